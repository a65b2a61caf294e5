use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use batch_locator::Application;
use locator_config::{AppConfig, LogConfig, LogLevel, OutputFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    let config_path = matches.get_one::<String>("config");
    let mut config = AppConfig::load(config_path.map(String::as_str)).with_context(|| {
        format!(
            "加载配置失败: {}",
            config_path.map(String::as_str).unwrap_or("<默认路径>")
        )
    })?;

    // 命令行参数覆盖配置中的日志设置
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.logging.level = level.parse::<LogLevel>().map_err(anyhow::Error::msg)?;
    }
    if let Some(format) = matches.get_one::<String>("log-format") {
        config.logging.format = format.parse::<OutputFormat>().map_err(anyhow::Error::msg)?;
    }
    init_logging(&config.logging)?;
    debug!("当前配置: {:?}", config);

    let app = Application::new(config);

    match matches.subcommand() {
        Some(("resolve", sub)) => run_resolve(&app, sub),
        Some(("locate", sub)) => run_locate(&app, sub).await,
        _ => Err(anyhow::anyhow!("缺少子命令")),
    }
}

fn build_cli() -> Command {
    Command::new("batch-locator")
        .version(env!("CARGO_PKG_VERSION"))
        .about("批处理作业标识解析与跨服务器定位")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .global(true)
                .help("配置文件路径"),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .global(true)
                .help("日志级别")
                .value_parser(["trace", "debug", "info", "warn", "error"]),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .value_name("FORMAT")
                .global(true)
                .help("日志格式")
                .value_parser(["json", "text", "pretty"]),
        )
        .subcommand(
            Command::new("resolve")
                .about("解析作业标识的规范形式和目的服务器")
                .arg(
                    Arg::new("job-id")
                        .value_name("JOB_ID")
                        .required(true)
                        .help("作业标识，例如 42.server@other"),
                ),
        )
        .subcommand(
            Command::new("locate")
                .about("根据服务器快照定位作业所在服务器")
                .arg(
                    Arg::new("job-id")
                        .value_name("JOB_ID")
                        .required(true)
                        .help("作业标识"),
                )
                .arg(
                    Arg::new("snapshot")
                        .short('s')
                        .long("snapshot")
                        .value_name("FILE")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("服务器状态快照 (JSON)"),
                ),
        )
}

fn run_resolve(app: &Application, matches: &ArgMatches) -> Result<()> {
    let job_id = matches
        .get_one::<String>("job-id")
        .context("缺少作业标识")?;
    let resolution = app.resolve(job_id)?;
    info!(
        "{} -> {} (目的服务器: {})",
        job_id,
        resolution.canonical_id(),
        if resolution.uses_default_routing() {
            "<默认>"
        } else {
            resolution.destination()
        }
    );
    let starting_server = app.starting_server(job_id)?;
    if let Some(server) = starting_server {
        info!("首先尝试服务器 {}:{}", server.name, server.port);
    }
    let output = serde_json::json!({
        "resolution": resolution,
        "starting_server": starting_server,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run_locate(app: &Application, matches: &ArgMatches) -> Result<()> {
    let job_id = matches
        .get_one::<String>("job-id")
        .context("缺少作业标识")?;
    let snapshot = matches
        .get_one::<PathBuf>("snapshot")
        .context("缺少快照文件")?;

    let reply = app.locate(job_id, snapshot).await?;
    println!("{}", serde_json::to_string_pretty(&reply)?);
    if !reply.is_success() {
        return Err(anyhow::anyhow!("定位作业 {} 被拒绝，错误码 {}", job_id, reply.code));
    }
    Ok(())
}

/// 初始化日志系统，日志写到标准错误，标准输出只留给结果
fn init_logging(config: &LogConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

    let registry = tracing_subscriber::registry().with(env_filter);
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    match config.format {
        OutputFormat::Json => registry
            .with(layer.json())
            .try_init()
            .context("初始化JSON日志格式失败")?,
        OutputFormat::Pretty => registry
            .with(layer.pretty())
            .try_init()
            .context("初始化Pretty日志格式失败")?,
        OutputFormat::Text => registry
            .with(layer.compact())
            .try_init()
            .context("初始化文本日志格式失败")?,
    }

    Ok(())
}
