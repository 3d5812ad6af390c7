use std::env;
use std::path::{Path, PathBuf};

const XMSS_C_FILES: &[&str] = &[
    "fips202.c",
    "hash.c",
    "hash_address.c",
    "params.c",
    "randombytes.c",
    "utils.c",
    "wots.c",
    "xmss.c",
    "xmss_commons.c",
    "xmss_core.c",
];

const XMSS_HEADERS: &[&str] = &[
    "fips202.h",
    "hash.h",
    "hash_address.h",
    "params.h",
    "randombytes.h",
    "utils.h",
    "wots.h",
    "xmss.h",
    "xmss_commons.h",
    "xmss_core.h",
];

fn main() {
    println!("cargo::rustc-check-cfg=cfg(xmss_reference)");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=XMSS_REFERENCE_DIR");

    let Some(source_dir) = reference_source_dir() else {
        println!(
            "cargo:warning=xmss-reference sources not found; set \
             XMSS_REFERENCE_DIR or populate vendor/xmss-reference to link \
             the C backend"
        );
        return;
    };

    let mut build = cc::Build::new();
    build.include(&source_dir);
    build.flag_if_supported("-std=c99");
    build.flag_if_supported("-Wno-unused-parameter");
    build.flag_if_supported("-Wno-sign-compare");

    for include_dir in openssl_include_dirs() {
        build.include(include_dir);
    }
    for file in XMSS_C_FILES {
        build.file(source_dir.join(file));
    }
    build.compile("xmss_reference");

    for lib_dir in openssl_lib_dirs() {
        println!("cargo:rustc-link-search=native={}", lib_dir.display());
    }
    println!("cargo:rustc-link-lib=crypto");
    println!("cargo:rustc-cfg=xmss_reference");

    for file in XMSS_C_FILES.iter().chain(XMSS_HEADERS) {
        println!(
            "cargo:rerun-if-changed={}",
            source_dir.join(file).display()
        );
    }
}

fn reference_source_dir() -> Option<PathBuf> {
    let candidate = match env::var("XMSS_REFERENCE_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").ok()?);
            manifest_dir.join("vendor/xmss-reference")
        }
    };
    let complete = XMSS_C_FILES
        .iter()
        .all(|file| candidate.join(file).is_file());
    complete.then_some(candidate)
}

fn openssl_include_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(include_dir) = env::var("OPENSSL_INCLUDE_DIR") {
        push_if_exists(&mut dirs, include_dir);
    }
    if let Ok(openssl_dir) = env::var("OPENSSL_DIR") {
        push_if_exists(&mut dirs, Path::new(&openssl_dir).join("include"));
    }

    push_if_exists(&mut dirs, "/opt/homebrew/opt/openssl@3/include");
    push_if_exists(&mut dirs, "/usr/local/opt/openssl@3/include");
    push_if_exists(&mut dirs, "/usr/include");

    dirs
}

fn openssl_lib_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(lib_dir) = env::var("OPENSSL_LIB_DIR") {
        push_if_exists(&mut dirs, lib_dir);
    }
    if let Ok(openssl_dir) = env::var("OPENSSL_DIR") {
        push_if_exists(&mut dirs, Path::new(&openssl_dir).join("lib"));
    }

    push_if_exists(&mut dirs, "/opt/homebrew/opt/openssl@3/lib");
    push_if_exists(&mut dirs, "/usr/local/opt/openssl@3/lib");

    dirs
}

fn push_if_exists<T: AsRef<Path>>(out: &mut Vec<PathBuf>, path: T) {
    let path = path.as_ref();
    if path.exists() {
        out.push(path.to_path_buf());
    }
}
