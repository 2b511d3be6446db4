fn main() {
    // CARGO_CFG_TARGET_OS rather than #[cfg()]: build scripts run on the host
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os == "windows" {
        // libgit2-sys needs security and registry functions from advapi32
        println!("cargo:rustc-link-lib=advapi32");
    }
}
