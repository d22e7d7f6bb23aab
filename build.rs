use std::{env, fs, path::PathBuf};

fn main() {
    // Put memory.x on the linker search path for RP2040 builds; host builds
    // need nothing from here.
    let target = env::var("TARGET").expect("TARGET not set");
    if target.starts_with("thumbv6m") {
        let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
        let memory_x = fs::read_to_string("memory.x").expect("Failed to read memory.x");
        fs::write(out_dir.join("memory.x"), memory_x).expect("Failed to write memory.x");
        println!("cargo:rustc-link-search={}", out_dir.display());
        println!("cargo:rerun-if-changed=memory.x");
    }
}
