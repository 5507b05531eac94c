fn main() -> anyhow::Result<()> {
    innsight_lib::run()
}
