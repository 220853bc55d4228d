// ==========================================
// 酒店后台 - 命令行入口
// ==========================================
// 子命令: import / list / batches / aliases
// 全局参数: --db / --locale / --log-json
// ==========================================

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use hotel_backoffice::config::{default_db_path, AliasTable, ConfigManager, ImportPipelineConfig};
use hotel_backoffice::db::ensure_db_dir;
use hotel_backoffice::i18n::{self, t, t_with_args};
use hotel_backoffice::{logging, ImportApi};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "hotel-backoffice",
    version,
    about = "Hotel back-office reservation importer",
    long_about = "Import reservation spreadsheets (CSV, XLS, XLSX) into the reservation table.\n\n\
                  Each import replaces the whole table in one transaction."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// SQLite database path (default: local data directory).
    #[arg(long = "db", value_name = "PATH", global = true)]
    db: Option<String>,

    /// Message language: ar, en or zh-CN.
    #[arg(long = "locale", default_value = "ar", global = true)]
    locale: String,

    /// Emit JSON log lines instead of human-readable logs.
    #[arg(long = "log-json", global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Import a reservation file, replacing all stored reservations.
    Import {
        /// CSV, XLS or XLSX file.
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// JSON alias overrides merged over the stored alias table.
        #[arg(long = "aliases", value_name = "JSON")]
        aliases: Option<PathBuf>,
    },

    /// List stored reservations, newest first.
    List {
        #[arg(long = "limit")]
        limit: Option<usize>,
    },

    /// Show recent import batches.
    Batches {
        #[arg(long = "limit", default_value_t = 10)]
        limit: usize,
    },

    /// Print the effective alias table as JSON.
    Aliases,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.log_json {
        logging::init_json();
    } else {
        logging::init();
    }
    i18n::set_locale(&cli.locale);

    let db_path = cli.db.unwrap_or_else(default_db_path);
    ensure_db_dir(&db_path).with_context(|| format!("无法创建数据库目录: {}", db_path))?;
    tracing::info!(version = hotel_backoffice::VERSION, db_path = %db_path, "酒店后台启动");

    let config_manager = ConfigManager::new(&db_path).map_err(|e| anyhow!("{}", e))?;
    let mut aliases = config_manager
        .load_alias_table()
        .map_err(|e| anyhow!("{}", e))?;

    match cli.command {
        Command::Import {
            file,
            aliases: overrides,
        } => {
            if let Some(path) = overrides {
                let extra = AliasTable::load_from_file(&path)
                    .map_err(|e| anyhow!("别名文件读取失败 {}: {}", path.display(), e))?;
                aliases.merge_overrides(extra);
            }

            let mut config = ImportPipelineConfig::new(db_path).with_aliases(aliases);
            if let Some(max) = config_manager
                .get_max_file_bytes()
                .map_err(|e| anyhow!("{}", e))?
            {
                config = config.with_max_file_bytes(max);
            }

            let api = ImportApi::new(config);
            match api.import_reservations(&file.to_string_lossy()).await {
                Ok(response) => {
                    println!("{}", response.message);
                    println!(
                        "{}",
                        t_with_args(
                            "import.detected_headers",
                            &[("headers", &response.detected_headers.join(", "))]
                        )
                    );
                    if !response.header_collisions.is_empty() {
                        println!(
                            "{}",
                            t_with_args(
                                "import.header_collisions",
                                &[("headers", &response.header_collisions.join(", "))]
                            )
                        );
                    }
                    if response.failed > 0 {
                        println!(
                            "{}",
                            t_with_args("import.row_failures", &[("count", &response.failed.to_string())])
                        );
                    }
                    println!("{}", serde_json::to_string_pretty(&response)?);
                }
                Err(e) => {
                    eprintln!("{}", e.localized_message());
                    return Err(e.into());
                }
            }
        }
        Command::List { limit } => {
            let api = ImportApi::new(ImportPipelineConfig::new(db_path).with_aliases(aliases));
            let reservations = api.list_reservations(limit).await?;
            if reservations.is_empty() {
                println!("{}", t("list.empty"));
            } else {
                println!("{}", serde_json::to_string_pretty(&reservations)?);
                let total = api.count_reservations().await?;
                println!("{}", t_with_args("list.total", &[("count", &total.to_string())]));
            }
        }
        Command::Batches { limit } => {
            let api = ImportApi::new(ImportPipelineConfig::new(db_path).with_aliases(aliases));
            let batches = api.list_batches(limit).await?;
            if batches.is_empty() {
                println!("{}", t("batches.empty"));
            } else {
                println!("{}", serde_json::to_string_pretty(&batches)?);
            }
        }
        Command::Aliases => {
            println!("{}", aliases.to_json_string()?);
        }
    }

    Ok(())
}
