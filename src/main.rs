//! Novel Editor - 命令行宿主
//!
//! 读取文本文件，切分章节，按参数执行拆分/合并/删除后导出

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use novel_editor::application::{DocumentEngine, TextSourcePort};
use novel_editor::config::{load_config, load_config_from_path, print_config, AppConfig};
use novel_editor::domain::manuscript::ChapterId;
use novel_editor::infrastructure::adapters::FileTextSource;

/// 小说章节切分与编辑
#[derive(Debug, Parser)]
#[command(name = "novel-editor", version, about)]
struct Cli {
    /// 配置文件路径（默认搜索 novel-editor.toml）
    #[arg(long, global = true, env = "NOVEL_EDITOR_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 导入文件并列出切分出的章节
    Inspect {
        /// 源文本文件
        file: PathBuf,

        /// 以 JSON 输出完整文稿快照
        #[arg(long)]
        json: bool,
    },

    /// 导入文件，执行编辑操作后导出
    Export(ExportArgs),
}

#[derive(Debug, Args)]
struct ExportArgs {
    /// 源文本文件
    file: PathBuf,

    /// 导出目录（覆盖配置中的 export.output_dir）
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// 拆分所有包含拆分标记的章节
    #[arg(long)]
    split_all: bool,

    /// 把指定章节与下一章合并（可重复）
    #[arg(long = "merge", value_name = "ID")]
    merge: Vec<String>,

    /// 删除指定章节（可重复）
    #[arg(long = "delete", value_name = "ID")]
    delete: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = match cli.config.as_deref() {
        Some(path) => load_config_from_path(Some(path)),
        None => load_config(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);
    print_config(&config);

    let engine = DocumentEngine::in_memory(config.editor_settings());
    let source = FileTextSource::new();

    match cli.command {
        Command::Inspect { file, json } => inspect(&engine, &source, &file, json).await,
        Command::Export(args) => export(&engine, &source, &config, args).await,
    }
}

fn init_tracing(config: &AppConfig) {
    let log_filter = format!("warn,novel_editor={}", config.log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn import_file(
    engine: &DocumentEngine,
    source: &FileTextSource,
    file: &Path,
) -> anyhow::Result<()> {
    let text = source.read(file).await?;
    engine.import_source(text)?;
    Ok(())
}

async fn inspect(
    engine: &DocumentEngine,
    source: &FileTextSource,
    file: &Path,
    json: bool,
) -> anyhow::Result<()> {
    import_file(engine, source, file).await?;

    if json {
        let manuscript = engine.manuscript()?;
        println!("{}", serde_json::to_string_pretty(manuscript.as_ref())?);
        return Ok(());
    }

    let manuscript = engine.manuscript()?;
    println!("{} ({} chapters)", manuscript.title(), manuscript.chapter_count());
    for chapter in engine.list_chapters()? {
        println!(
            "{:<16} {:>6} {:<10} {:>8}  {}",
            chapter.id, chapter.order, chapter.status, chapter.char_count, chapter.title
        );
    }
    Ok(())
}

async fn export(
    engine: &DocumentEngine,
    source: &FileTextSource,
    config: &AppConfig,
    args: ExportArgs,
) -> anyhow::Result<()> {
    import_file(engine, source, &args.file).await?;

    if args.split_all {
        let split = engine.split_all()?;
        tracing::info!("Split {} chapters on marker", split);
    }

    for id in &args.merge {
        let response = engine.merge_with_next(&ChapterId::from(id.as_str()))?;
        if response.merged.is_none() {
            tracing::warn!("Chapter {} has no next chapter, merge skipped", id);
        }
    }

    for id in &args.delete {
        engine.delete_chapter(&ChapterId::from(id.as_str()))?;
    }

    let exported = engine.export_document()?;
    let output_dir = args
        .output_dir
        .unwrap_or_else(|| config.export.output_dir.clone());
    let path = source.write_export(&output_dir, &exported).await?;

    println!("{}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_export_with_repeated_operations() {
        let cli = Cli::try_parse_from([
            "novel-editor",
            "export",
            "book.txt",
            "--split-all",
            "--merge",
            "chapter-1",
            "--merge",
            "chapter-3",
            "--delete",
            "chapter-5",
        ])
        .unwrap();

        match cli.command {
            Command::Export(args) => {
                assert_eq!(args.file, PathBuf::from("book.txt"));
                assert!(args.split_all);
                assert_eq!(args.merge, vec!["chapter-1", "chapter-3"]);
                assert_eq!(args.delete, vec!["chapter-5"]);
                assert!(args.output_dir.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_config_after_subcommand() {
        let cli = Cli::try_parse_from([
            "novel-editor",
            "inspect",
            "book.txt",
            "--json",
            "--config",
            "custom.toml",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Command::Inspect { json: true, .. }));
    }
}
