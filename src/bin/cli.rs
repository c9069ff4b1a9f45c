fn main() -> anyhow::Result<()> {
    driftwatch_ui_terminal::run()
}
