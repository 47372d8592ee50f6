fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // The libopus backend is opt-in so the session logic builds without the
    // native library installed.
    if std::env::var_os("CARGO_FEATURE_LIBOPUS").is_none() {
        return;
    }

    println!("cargo:rustc-link-search=native=/opt/homebrew/lib");
    println!("cargo:rustc-link-search=native=/usr/local/lib");
    println!("cargo:rustc-link-lib=opus");
}
