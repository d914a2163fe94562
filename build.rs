use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=TADBIT_LIB_DIR");
    println!("cargo:rerun-if-env-changed=TADBIT_STATIC");

    // The engine is only linked when the `native` feature asks for it.
    if env::var_os("CARGO_FEATURE_NATIVE").is_none() {
        return;
    }

    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();

    match env::var("TADBIT_LIB_DIR") {
        Ok(dir) => println!("cargo:rustc-link-search=native={}", dir),
        Err(_) => println!("cargo:warning=TADBIT_LIB_DIR not set, relying on the system linker path"),
    }

    let kind = if env::var_os("TADBIT_STATIC").is_some() {
        "static"
    } else {
        "dylib"
    };
    println!("cargo:rustc-link-lib={}=tadbit", kind);

    // A static libtadbit pulls in pthreads and libm.
    if kind == "static" {
        match target_os.as_str() {
            "linux" => {
                println!("cargo:rustc-link-lib=pthread");
                println!("cargo:rustc-link-lib=m");
            }
            "macos" => println!("cargo:rustc-link-lib=m"),
            _ => println!("cargo:warning=Static tadbit on {} may need extra link flags", target_os),
        }
    }
}
