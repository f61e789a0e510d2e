fn main() -> std::process::ExitCode {
    telehealth_lib::run()
}
