mod handler;
mod io;
mod protocol;

use std::io::{BufRead, Write};

use crate::{cli::Args, error::AppResult, store};

use handler::BridgeHandler;
use io::NdjsonIo;
use protocol::BridgeRequest;

pub fn run(args: Args) -> AppResult<()> {
    let store = store::open(args.store.as_deref())?;
    let mut handler = BridgeHandler::new(args.pager_config(), store);
    let stdin = std::io::stdin();
    let mut io = NdjsonIo::new(stdin.lock(), std::io::BufWriter::new(std::io::stdout()));
    tracing::info!("bridge ready");
    serve(&mut io, &mut handler)
}

fn serve<R: BufRead, W: Write>(io: &mut NdjsonIo<R, W>, handler: &mut BridgeHandler) -> AppResult<()> {
    loop {
        let Some(line) = io.read_line()? else { break };
        if line.is_empty() {
            continue;
        }

        let req: BridgeRequest = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                // id unknown when the frame does not parse
                let _ = io.protocol_error("", 1, e.to_string());
                continue;
            }
        };

        let resp = handler.handle(req);
        io.write_json_line(&resp)?;
    }

    Ok(())
}
