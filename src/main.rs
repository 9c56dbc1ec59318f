//! 管理控制台命令行入口

use admin_console::{
    config::ConsoleConfig,
    http::TracingNotifier,
    models::{
        accounting::{AccountingQuery, AccountingType},
        expense_type::ExpenseTypeQuery,
        service::ServiceQuery,
        upload::UploadFile,
        RecordId,
    },
    routes::{LOGIN_PATH, ROUTES},
    telemetry, validation, Console,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "admin-console", version, about = "管理控制台命令行客户端")]
struct Cli {
    /// 覆盖 CONSOLE_API__BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 登录并保存会话
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// 登出
    Logout {
        /// 同时调用服务端登出接口
        #[arg(long)]
        remote: bool,
    },
    /// 显示当前会话中的用户
    Whoami {
        /// 从服务端重新获取
        #[arg(long)]
        fetch: bool,
    },
    /// 刷新令牌
    Refresh,
    /// 按路由守卫解析页面路径
    Navigate { path: String },
    /// 列出所有页面路由
    Routes,
    /// 服务信息
    Services {
        #[command(subcommand)]
        action: ServiceAction,
    },
    /// 记账记录
    Accounting {
        #[command(subcommand)]
        action: AccountingAction,
    },
    /// 费用类型
    ExpenseTypes {
        #[command(subcommand)]
        action: ExpenseTypeAction,
    },
    /// 上传文件，多个文件走批量接口
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// 校验手机号
    CheckPhone { value: String },
}

#[derive(Debug, Subcommand)]
enum ServiceAction {
    List {
        #[arg(long)]
        keyword: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
    },
    Get { id: String },
    Delete { id: String },
    BatchDelete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RecordKind {
    Income,
    Expense,
}

impl From<RecordKind> for AccountingType {
    fn from(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Income => AccountingType::Income,
            RecordKind::Expense => AccountingType::Expense,
        }
    }
}

#[derive(Debug, Subcommand)]
enum AccountingAction {
    List {
        #[arg(long, value_enum)]
        kind: Option<RecordKind>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
    },
    Stats {
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
    },
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
enum ExpenseTypeAction {
    List {
        #[arg(long)]
        keyword: Option<String>,
    },
    Delete { id: String },
}

/// 数字形式的 id 按数字提交，其余按字符串
fn parse_id(raw: &str) -> RecordId {
    raw.parse::<i64>()
        .map(RecordId::Number)
        .unwrap_or_else(|_| RecordId::Text(raw.to_string()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Ok(env) = std::env::var("CONSOLE_ENV") {
        dotenv::from_filename(format!(".env.{}", env)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::from_filename(".env.development").ok();
        dotenv::dotenv().ok();
    }

    let mut config = ConsoleConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid --base-url: {}", e))?;
    }

    telemetry::init_telemetry(&config);

    let console = Console::from_config(&config, Arc::new(TracingNotifier))?;
    console.session.init_user_info();

    run(&console, cli.command).await
}

async fn run(console: &Console, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { username, password } => {
            let user = console.login(&username, &password).await?;
            print_json(&user)?;
        }
        Command::Logout { remote } => {
            if remote {
                console.session.logout_remote(&console.auth).await?;
                console.router.navigate(LOGIN_PATH)?;
            } else {
                console.logout()?;
            }
            eprintln!("已退出登录");
        }
        Command::Whoami { fetch } => {
            if fetch {
                print_json(&console.auth.get_user_info().await?)?;
            } else {
                print_json(&console.session.current_user())?;
            }
        }
        Command::Refresh => {
            console.session.refresh(&console.auth).await?;
            eprintln!("令牌已刷新");
        }
        Command::Navigate { path } => {
            let route = console.router.navigate(&path)?;
            println!("{}\t{}", route.path, route.title.unwrap_or("-"));
        }
        Command::Routes => {
            for route in ROUTES {
                println!(
                    "{}\t{}\t{}",
                    route.path,
                    route.name.unwrap_or("-"),
                    route.title.unwrap_or("-")
                );
            }
        }
        Command::Services { action } => match action {
            ServiceAction::List {
                keyword,
                status,
                page,
                page_size,
            } => {
                let query = ServiceQuery {
                    keyword,
                    status,
                    page,
                    page_size,
                };
                print_json(&console.services.list(&query).await?)?;
            }
            ServiceAction::Get { id } => {
                print_json(&console.services.get(&parse_id(&id)).await?)?;
            }
            ServiceAction::Delete { id } => {
                console.services.delete(&parse_id(&id)).await?;
                eprintln!("删除成功");
            }
            ServiceAction::BatchDelete { ids } => {
                let ids: Vec<RecordId> = ids.iter().map(|id| parse_id(id)).collect();
                console.services.batch_delete(&ids).await?;
                eprintln!("已删除 {} 条记录", ids.len());
            }
        },
        Command::Accounting { action } => match action {
            AccountingAction::List {
                kind,
                category,
                start_date,
                end_date,
                page,
                page_size,
            } => {
                let query = AccountingQuery {
                    record_type: kind.map(Into::into),
                    category,
                    start_date,
                    end_date,
                    page,
                    page_size,
                };
                print_json(&console.accounting.list(&query).await?)?;
            }
            AccountingAction::Stats {
                start_date,
                end_date,
            } => {
                let query = AccountingQuery {
                    start_date,
                    end_date,
                    ..Default::default()
                };
                print_json(&console.accounting.stats(&query).await?)?;
            }
            AccountingAction::Delete { id } => {
                console.accounting.delete(&parse_id(&id)).await?;
                eprintln!("删除成功");
            }
        },
        Command::ExpenseTypes { action } => match action {
            ExpenseTypeAction::List { keyword } => {
                let query = ExpenseTypeQuery {
                    keyword,
                    ..Default::default()
                };
                print_json(&console.expense_types.list(&query).await?)?;
            }
            ExpenseTypeAction::Delete { id } => {
                console.expense_types.delete(&parse_id(&id)).await?;
                eprintln!("删除成功");
            }
        },
        Command::Upload { files } => {
            let mut uploads = Vec::with_capacity(files.len());
            for path in &files {
                uploads.push(UploadFile::from_path(path).await?);
            }

            if uploads.len() == 1 {
                let file = uploads.remove(0);
                print_json(&console.uploads.upload_file(file).await?)?;
            } else {
                print_json(&console.uploads.upload_files(uploads).await?)?;
            }
        }
        Command::CheckPhone { value } => match validation::phone_valid(&value) {
            Ok(()) => println!("ok"),
            Err(e) => {
                let message = e.message.map(|m| m.to_string()).unwrap_or_default();
                anyhow::bail!(message);
            }
        },
    }

    Ok(())
}
