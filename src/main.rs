fn main() -> anyhow::Result<()> {
    circman::cli::run()
}
