// File: crates/benchplot-core/build.rs
// Summary: Links the Windows system libraries Skia's font manager and ICU pull in.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // RegOpenKeyExW and friends, used by Skia's font manager
        println!("cargo:rustc-link-lib=advapi32");
    }
}
