use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    vulnscope_lib::run().await
}
