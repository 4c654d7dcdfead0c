fn main() -> anyhow::Result<()> {
    okenaba_cli::run()
}
