use std::env;
use std::process::exit;

use anyhow::Context;
use getopts::Options;
use log::info;

use bananabot::client::prelude::*;

const DEFAULT_CONFIG: &str = "config.yaml";

fn usage(program: &str, opts: &Options) -> String {
    let brief = format!("Usage: {} [options] [CONFIG]", program);
    opts.usage(&brief)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let mut opts = Options::new();
    opts.optflag("h", "help", "Print the usage menu");
    let matches = opts.parse(&args[1..]).context("invalid arguments")?;
    if matches.opt_present("h") {
        println!("{}", usage(&args[0], &opts));
        exit(0);
    }
    let path = matches
        .free
        .first()
        .map(String::as_str)
        .unwrap_or(DEFAULT_CONFIG);

    let config = Config::load(path).with_context(|| format!("failed to load {}", path))?;
    let mut bot: Bot = Bot::new(config, Handlers::with_builtins());
    bot.connect().await.context("failed to connect")?;

    let interrupted = tokio::select! {
        res = bot.mainloop() => {
            res.context("bot stopped")?;
            false
        }
        _ = tokio::signal::ctrl_c() => true,
    };

    if interrupted {
        info!("Interrupted, quitting.");
        bot.quit("Interrupted").await?;
    }
    Ok(())
}
