use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::io::AsyncReadExt;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

mod api;
mod config;
mod engine;
mod monitoring;

use config::{ConfigError, QuoterConfig, load_config};
use engine::{QuoteRequest, QuoteRequestBody, QuoteService, RequestDefaults, validation};

const CONFIG_TEMPLATE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/quoter.toml"));

#[derive(Parser, Debug)]
#[command(name = "quoter", version, about = "链上路由与荷兰拍统一报价")]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "配置文件路径（默认查找 quoter.toml 或 config/quoter.toml）"
    )]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 对一个报价请求体执行完整报价流程并输出最佳报价
    Quote(QuoteCmd),
    /// 初始化配置模版文件
    Init(InitCmd),
}

#[derive(Args, Debug)]
struct QuoteCmd {
    #[arg(long, value_name = "FILE", help = "请求体 JSON 文件路径（缺省从 stdin 读取）")]
    input: Option<PathBuf>,
    #[arg(long, help = "探测请求使用的 gas 价格（wei）；缺省取 CLASSIC 配置中的值")]
    gas_price_wei: Option<String>,
    #[arg(long, help = "同时输出全部候选报价")]
    candidates: bool,
}

#[derive(Args, Debug)]
struct InitCmd {
    #[arg(long, value_name = "DIR", help = "可选输出目录（默认当前目录）")]
    output: Option<PathBuf>,
    #[arg(long, help = "若文件存在则覆盖")]
    force: bool,
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Command::Init(args) = &cli.command {
        return init_config(args);
    }

    let config = load_configuration(cli.config.clone())?;
    init_tracing(&config.global.logging)?;

    if monitoring::init_prometheus(&config.global.prometheus)? {
        info!(
            target: "monitoring",
            listen = %config.global.prometheus.listen,
            "Prometheus exporter 已启动"
        );
    }

    match cli.command {
        Command::Quote(args) => run_quote(&config, args).await,
        Command::Init(_) => Ok(()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

fn init_tracing(config: &config::LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.json {
        fmt()
            .with_env_filter(filter)
            .json()
            .with_current_span(false)
            .with_span_list(false)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    }
    Ok(())
}

fn load_configuration(path: Option<PathBuf>) -> Result<QuoterConfig, ConfigError> {
    load_config(path)
}

async fn read_body(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("读取请求体失败: {}", path.display())),
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .context("从 stdin 读取请求体失败")?;
            Ok(raw)
        }
    }
}

/// CLI 参数优先，其次是请求体里 CLASSIC 配置携带的 gas 价格。
fn resolve_gas_price(flag: Option<&str>, requests: &[QuoteRequest]) -> Result<Option<String>> {
    if let Some(raw) = flag {
        return Ok(Some(validation::gas_price_wei(raw)?));
    }
    Ok(requests
        .iter()
        .filter_map(QuoteRequest::as_classic)
        .find_map(|classic| classic.config.gas_price_wei.clone()))
}

async fn run_quote(config: &QuoterConfig, args: QuoteCmd) -> Result<()> {
    let raw = read_body(args.input.as_ref()).await?;
    let defaults = RequestDefaults::from(&config.request);
    let requests = QuoteRequestBody::from_json(&raw)?.into_requests(&defaults)?;
    let gas_price_wei = resolve_gas_price(args.gas_price_wei.as_deref(), &requests)?;

    let client = reqwest::Client::builder()
        .build()
        .context("构建 HTTP 客户端失败")?;
    let service = QuoteService::from_config(config, client)?;
    info!(
        target: "engine::dispatcher",
        quoters = ?service.dispatcher().quoter_names(),
        requests = requests.len(),
        "开始报价"
    );

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!(target: "engine::dispatcher", "收到 Ctrl-C，取消报价");
            ctrl_c.cancel();
        }
    });

    let outcome = service
        .quote(requests, gas_price_wei.as_deref(), &cancel)
        .await?;

    let mut response = outcome.to_response_json()?;
    if args.candidates {
        let candidates = outcome
            .candidates
            .iter()
            .map(|quote| quote.to_log())
            .collect::<Vec<_>>();
        response["candidates"] = serde_json::to_value(candidates)?;
    }
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn init_config(args: &InitCmd) -> Result<()> {
    let output_dir = match &args.output {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    fs::create_dir_all(&output_dir)?;

    let target_path = output_dir.join("quoter.toml");
    if target_path.exists() && !args.force {
        println!(
            "跳过 {}（文件已存在，如需覆盖请加 --force）",
            target_path.display()
        );
        return Ok(());
    }

    fs::write(&target_path, CONFIG_TEMPLATE)?;
    println!("已写入 {}", target_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::request::fixtures;
    use crate::engine::types::TradeType;

    #[test]
    fn template_parses_into_defaults() {
        let parsed: QuoterConfig = toml::from_str(CONFIG_TEMPLATE).expect("template parses");
        let defaults = QuoterConfig::default();
        assert_eq!(parsed.gas.base_execution_gas, defaults.gas.base_execution_gas);
        assert_eq!(
            parsed.request.default_slippage_bps,
            defaults.request.default_slippage_bps
        );
        assert!(parsed.providers.routing_api.is_active());
        assert!(!parsed.providers.rfq.is_active());
    }

    #[test]
    fn gas_price_flag_wins_over_body() {
        let requests: Vec<QuoteRequest> =
            vec![fixtures::classic(TradeType::ExactInput, 1).into()];
        assert_eq!(
            resolve_gas_price(Some("42"), &requests).unwrap().as_deref(),
            Some("42")
        );
        assert_eq!(
            resolve_gas_price(None, &requests).unwrap().as_deref(),
            Some("1000")
        );
        assert!(resolve_gas_price(Some("4.2"), &requests).is_err());
    }

    #[tokio::test]
    async fn reads_body_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body.json");
        fs::write(&path, r#"{"configs":[]}"#).unwrap();
        assert_eq!(read_body(Some(&path)).await.unwrap(), r#"{"configs":[]}"#);
        assert!(read_body(Some(&dir.path().join("missing.json"))).await.is_err());
    }

    #[test]
    fn init_does_not_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("quoter.toml");
        fs::write(&target, "# mine").unwrap();

        let args = InitCmd {
            output: Some(dir.path().to_path_buf()),
            force: false,
        };
        init_config(&args).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "# mine");

        let args = InitCmd {
            output: Some(dir.path().to_path_buf()),
            force: true,
        };
        init_config(&args).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), CONFIG_TEMPLATE);
    }
}
