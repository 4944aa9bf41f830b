pub enum CliModeResult {
    Finish,
    NothingToDo,
}
