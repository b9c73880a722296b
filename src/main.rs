fn main() -> anyhow::Result<()> {
    unsafe { std::env::set_var("RUST_BACKTRACE", "1") };
    poddium::app_core::Poddium::new()?.run()?;
    Ok(())
}
