/// Build script for sortviz
/// Captures build metadata shown by `sortviz version`

fn main() {
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-changed=Cargo.lock");

    // Embed version information
    if let Ok(version) = std::env::var("CARGO_PKG_VERSION") {
        println!("cargo:rustc-env=SORTVIZ_VERSION={version}");
    }

    // Git hash, when built from a checkout
    if let Ok(output) = std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
    {
        if output.status.success() {
            if let Ok(hash) = String::from_utf8(output.stdout) {
                println!("cargo:rustc-env=GIT_HASH={}", hash.trim());
            }
        }
    }

    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", unix_timestamp());
}

/// Seconds since the Unix epoch
fn unix_timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{secs}")
}
