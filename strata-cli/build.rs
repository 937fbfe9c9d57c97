//! Build script for strata-cli.
//!
//! This script generates the man page at build time using clap_mangen.
//! The generated page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
fn build_cli() -> Command {
    Command::new("strata")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect layered configuration files")
        .long_about(
            "Load TOML, JSON, INI, XML and YAML files, merge them into one dotted key space \
             and query the result",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format for values")
                .value_name("FORMAT")
                .value_parser(["json", "yaml"])
                .default_value("json")
                .global(true)
                .env("STRATA_FORMAT"),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .help("Required configuration file or directory (repeatable)")
                .value_name("PATH")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .global(true)
                .env("STRATA_FILES"),
        )
        .arg(
            Arg::new("optional")
                .short('o')
                .long("optional")
                .help("Optional configuration file or directory, loaded last (repeatable)")
                .value_name("PATH")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .global(true)
                .env("STRATA_OPTIONAL"),
        )
        .subcommands(vec![
            Command::new("get")
                .about("Print the value stored at a dotted key")
                .long_about("Print the value at KEY, or the --default value when it is absent"),
            Command::new("has")
                .about("Exit successfully if a dotted key is present")
                .long_about("Exit with status 0 if KEY is present and 1 otherwise"),
            Command::new("dump")
                .about("Print the whole merged configuration")
                .long_about("Print the merged configuration tree as JSON or YAML"),
            Command::new("flatten")
                .about("Print every leaf as a dotted key")
                .long_about("Print one `key = value` line per leaf of the merged tree"),
            Command::new("extensions")
                .about("List the supported file extensions")
                .long_about("List the registered file extensions in resolution order"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("failed to create man directory");

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).expect("failed to render man page");

    fs::write(man_dir.join("strata.1"), buffer).expect("failed to write man page");

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
