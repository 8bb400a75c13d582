fn main() {
    println!("cargo:rerun-if-env-changed=GLYPHFALL_BUILD");

    let build_id = match std::env::var("GLYPHFALL_BUILD") {
        Ok(v) if !v.is_empty() => v,
        _ => infer_build_id(),
    };

    println!("cargo:rustc-env=GLYPHFALL_BUILD={}", build_id);
}

fn infer_build_id() -> String {
    let os_raw = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_else(|_| "unknown".to_string());
    let os = match os_raw.as_str() {
        "macos" => "darwin",
        other => other,
    };
    let arch = std::env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_else(|_| "unknown".to_string());
    format!("{os}-{arch}")
}
