use clap::Parser;

fn main() {
    let args = exit_fee_seller::arguments::Arguments::parse();
    let mut config = observe::Config::new(&args.log_filter, args.log_stderr_threshold, false);
    if args.use_json_logs {
        config = config.with_json_format();
    }
    observe::tracing::initialize(&config);
    tracing::info!("running exit fee seller with validated arguments:\n{}", args);

    if let Err(err) = exit_fee_seller::run(args) {
        tracing::error!(?err, "exit fee seller failed");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
