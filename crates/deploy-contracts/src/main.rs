use {
    clap::Parser,
    deploy_contracts::arguments::Arguments,
    std::process::ExitCode,
};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Arguments::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return deploy_contracts::parse_exit_code(&err);
        }
    };
    observe::tracing::initialize_with_config(&observe::config::Config::new(
        &args.log_filter,
        args.log_stderr_threshold,
        args.log_json,
    ));
    tracing::debug!("running deploy-contracts with validated arguments:\n{}", args);

    let result = deploy_contracts::run(args).await;
    if let Err(err) = &result {
        tracing::error!("{err:?}");
    }
    deploy_contracts::exit_code(&result)
}
