use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use covid_stats::{
    cases_by_date, date_label, load_case_table, no_new_cases_count, top_countries_by_date,
    CONFIRMED_CASES_URL, DEFAULT_YEAR,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// 基于 CSSE 确诊病例时间序列的简单统计
#[derive(Debug, Parser)]
#[command(name = "covid-stats", version, about)]
struct Cli {
    /// 数据源：http(s):// 地址、file:// 地址或本地路径
    #[arg(long, global = true, env = "COVID_STATS_SOURCE", default_value = CONFIRMED_CASES_URL)]
    source: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// 某个国家在给定日期的累计确诊数
    Cases {
        #[arg(long, default_value = "Poland")]
        country: String,
        #[command(flatten)]
        date: DateArgs,
    },
    /// 给定日期确诊数最多的国家
    Top {
        #[arg(short = 'n', long = "count", default_value_t = 5)]
        n: usize,
        #[command(flatten)]
        date: DateArgs,
    },
    /// 与前一天相比确诊数没有变化的国家/地区数
    Unchanged {
        #[command(flatten)]
        date: DateArgs,
    },
    /// 列出表中的所有日期列
    Dates,
}

#[derive(Debug, Args)]
struct DateArgs {
    day: u32,
    month: u32,
    #[arg(long, default_value_t = DEFAULT_YEAR)]
    year: i32,
}

#[tokio::main]
async fn main() {
    // 日志写到 stderr，stdout 只输出结果
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let table = load_case_table(&cli.source)
        .await
        .with_context(|| format!("could not load confirmed cases from {}", cli.source))?;

    match cli.command {
        Commands::Cases { country, date } => {
            let cases = cases_by_date(&table, &country, date.day, date.month, Some(date.year))?;
            println!("{}", cases);
        }
        Commands::Top { n, date } => {
            for country in top_countries_by_date(&table, n, date.day, date.month, Some(date.year))? {
                println!("{}", country);
            }
        }
        Commands::Unchanged { date } => {
            let count = no_new_cases_count(&table, date.day, date.month, Some(date.year))?;
            println!("{}", count);
        }
        Commands::Dates => {
            for label in table.date_labels() {
                println!("{}", label);
            }
            if let (Some(first), Some(last)) = (table.first_date(), table.last_date()) {
                info!("dates from {} to {}", date_label(first), date_label(last));
            }
        }
    }

    Ok(())
}
