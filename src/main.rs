//! Command-line entry point.
//!
//! Logs go to stderr (or `--log-file`); stdout only carries command output.

use std::io::{
    self,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
};
use docs_nav::anchor::{
    AnchorMatch,
    content_ready,
};
use docs_nav::config::{
    ConfigError,
    ConfigManager,
};
use docs_nav::dom::{
    EventHub,
    MemoryDocument,
};
use docs_nav::page::{
    DEFAULT_VIEWPORT_WIDTH,
    NavigationSnapshot,
    Page,
    PageOptions,
};
use docs_nav::site::{
    Site,
    SiteError,
    parse_location,
};
use docs_nav::slug::slugify;
use docs_nav::switcher::MenuRegions;
use serde::Serialize;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// コマンドライン引数
#[derive(Parser)]
#[command(name = "docs-nav")]
#[command(version)]
#[command(about = "Navigation state of a multi-language documentation site")]
struct Cli {
    /// Workspace root holding `.docs-nav.json` (default: current directory)
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Explicit configuration file (overrides `--root` lookup)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

/// サブコマンド
#[derive(Subcommand)]
enum Commands {
    /// Print the navigation state of a page as JSON
    Nav {
        /// Page URL or site path (e.g. `/ja/docs/#shader-design`)
        #[arg(value_name = "LOCATION")]
        location: String,

        /// TOC section (default: derived from the path)
        #[arg(short, long)]
        section: Option<String>,

        /// Viewport width in CSS pixels
        #[arg(short, long, default_value_t = DEFAULT_VIEWPORT_WIDTH)]
        width: u32,

        /// Heading text of the page content, in order; used to resolve the
        /// fragment
        #[arg(long = "heading", value_name = "TEXT")]
        headings: Vec<String>,
    },

    /// Print the slug of a heading text
    Slug {
        /// Heading text (words are joined with spaces)
        #[arg(value_name = "TEXT", required = true)]
        text: Vec<String>,
    },

    /// Validate the configuration and the tables it references
    Check,
}

/// コマンド実行時のエラー
#[derive(Error, Debug)]
enum CliError {
    /// 設定ファイルの読み込み・検証エラー
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// 翻訳テーブル・TOC の読み込みエラー
    #[error(transparent)]
    Site(#[from] SiteError),

    /// 作業ディレクトリの取得エラー
    #[error("Failed to read the working directory: {0}")]
    CurrentDir(#[source] io::Error),

    /// 標準出力への書き込みエラー
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),

    /// JSON シリアライズエラー
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// `nav` の出力
#[derive(Serialize)]
struct NavOutput {
    /// ページのナビゲーション状態
    #[serde(flatten)]
    snapshot: NavigationSnapshot,
    /// フラグメントの解決結果
    anchor: Option<AnchorMatch>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.log_file.as_deref());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            // Nothing else can be reported if stderr is gone.
            let _ = writeln!(io::stderr().lock(), "error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// ログ出力を初期化する
///
/// `RUST_LOG` が未設定なら `warn` 以上のみ出力する。
fn init_tracing(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let Some(path) = log_file else {
        builder.with_writer(io::stderr).init();
        return None;
    };
    let directory = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().map_or_else(|| "docs-nav.log".into(), ToOwned::to_owned);
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
    builder.with_writer(writer).with_ansi(false).init();
    Some(guard)
}

/// サブコマンドを実行する
async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Slug { text } => {
            writeln!(io::stdout().lock(), "{}", slugify(&text.join(" ")))?;
            Ok(())
        }
        Commands::Check => {
            let manager = load_config(cli.root, cli.config.as_deref())?;
            let site = Site::from_config(&manager)?;
            let sections: Vec<&str> = site.toc().sections().collect();
            writeln!(
                io::stdout().lock(),
                "ok: {} locales (default {}), sections: {}",
                site.locales().iter().count(),
                site.locales().default_locale(),
                sections.join(", ")
            )?;
            Ok(())
        }
        Commands::Nav { location, section, width, headings } => {
            let manager = load_config(cli.root, cli.config.as_deref())?;
            let site = Site::from_config(&manager)?;
            let url = parse_location(&location)?;

            let (mut doc, menu) = page_document();
            let hub = EventHub::new();
            let mut options = PageOptions::new(menu).with_viewport_width(width);
            if let Some(section) = section {
                options = options.with_section(section);
            }
            let page = Page::mount(&site, url, &mut doc, &hub, options);

            let (signal, ready) = content_ready();
            let body = doc.root();
            for heading in &headings {
                doc.append_heading(body, 2, heading, None);
            }
            signal.notify();
            let anchor = page.resolve_anchor(&mut doc, ready).await;

            let output = NavOutput { snapshot: page.snapshot(), anchor };
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &output)?;
            writeln!(stdout)?;
            Ok(())
        }
    }
}

/// 設定を読み込む（`--config` 優先、なければワークスペースルートから探す）
fn load_config(root: Option<PathBuf>, config: Option<&Path>) -> Result<ConfigManager, CliError> {
    let mut manager = ConfigManager::new();
    if let Some(config) = config {
        manager.load_file(config)?;
    } else {
        let root = match root {
            Some(root) => root,
            None => std::env::current_dir().map_err(CliError::CurrentDir)?,
        };
        manager.load_settings(Some(root))?;
    }
    Ok(manager)
}

/// 言語メニューだけを持つページ
fn page_document() -> (MemoryDocument, MenuRegions) {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let header = doc.append_element(root, "header", &[]);
    let trigger = doc.append_element(header, "button", &[("aria-haspopup", "true")]);
    let menu = doc.append_element(header, "ul", &[("role", "menu")]);
    (doc, MenuRegions { trigger, menu })
}
