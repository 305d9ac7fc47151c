use anyhow::Result;
use calitask_core::wire::normalize_due;

pub fn run(value: &str) -> Result<()> {
    let strict = normalize_due(value)?;
    println!("{}", strict);
    Ok(())
}
