use std::error::Error;

use cmv_verify::format::ascii_only;
use cmv_verify::{CheckKind, Manifest};

/// Prints a sample manifest for `kind` to stdout.
pub fn run(kind: CheckKind) -> Result<(), Box<dyn Error>> {
    let json = Manifest::example(kind).to_json_pretty()?;
    for line in json.lines() {
        println!("{}", ascii_only(line));
    }
    Ok(())
}
