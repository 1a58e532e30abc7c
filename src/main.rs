fn main() -> std::process::ExitCode {
    dralithus::cli::run().into()
}
