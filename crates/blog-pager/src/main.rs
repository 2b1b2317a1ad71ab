use blog_pager::{
    adapters,
    cli::Args,
    error::{AppError, AppResult},
    logging,
};
use clap::Parser;

fn main() -> AppResult<()> {
    let args = Args::parse();
    logging::init(&args.log_level);

    if args.mcp {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AppError::Internal(e.to_string()))?;
        rt.block_on(adapters::mcp::server::run(args))
    } else {
        adapters::bridge::run(args)
    }
}
