use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use translated_sheet::io::{
    DefaultDocumentReader, DefaultDocumentWriter, DefaultElementReader, DefaultSheetReader,
    DefaultSheetWriter, DocumentReader, DocumentWriter, ElementReader,
};
use translated_sheet::utils::create_backup;
use translated_sheet::{
    export_batch, export_element, flatten, import_element, DecoratorRegistry, Element, FlagMatch,
    ImportOutcome, Settings, SUPPORTED_EXTENSIONS,
};

#[derive(Parser)]
#[command(name = "translated_sheet")]
#[command(about = "导出元素的可翻译字段到表格，并把译文表格回写到元素")]
#[command(version)]
struct Cli {
    /// 配置文件(JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 静默模式(仅输出错误)
    #[arg(long, global = true)]
    quiet: bool,

    /// 输出调试日志
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 导出单个元素为 CSV 表格
    Export {
        /// 元素 JSON 文件
        #[arg(short, long)]
        input: PathBuf,

        /// 输出目录
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// 一并导出别名
        #[arg(long)]
        translate_slugs: bool,
    },

    /// 并行导出多个元素
    ExportBatch {
        /// 元素 JSON 文件（可重复）
        #[arg(short, long, required = true)]
        input: Vec<PathBuf>,

        /// 输出目录
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// 一并导出别名
        #[arg(long)]
        translate_slugs: bool,
    },

    /// 把交付的译文表格回写到元素
    Import {
        /// 原始元素 JSON 文件
        #[arg(long)]
        original: PathBuf,

        /// 交付的 CSV 表格
        #[arg(long)]
        sheet: PathBuf,

        /// 输出文档 JSON 文件
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 结构性标记按子串匹配（旧行为）
        #[arg(long)]
        legacy_flag_match: bool,
    },

    /// 打印文档的扁平化结果
    Flatten {
        /// 文档 JSON 文件
        #[arg(short, long)]
        input: PathBuf,
    },

    /// 统计元素可翻译单词数
    WordCount {
        /// 元素 JSON 文件
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = load_settings(cli.config.as_deref())?;

    match &cli.command {
        Command::Export { input, output_dir, translate_slugs } => {
            let settings = with_slugs(settings, *translate_slugs);
            handle_export(&cli, &settings, input, output_dir.as_deref())
        }
        Command::ExportBatch { input, output_dir, translate_slugs } => {
            let settings = with_slugs(settings, *translate_slugs);
            handle_export_batch(&cli, &settings, input, output_dir.as_deref())
        }
        Command::Import { original, sheet, output, legacy_flag_match } => {
            let mut settings = settings;
            if *legacy_flag_match {
                settings.flag_match = FlagMatch::Substring;
            }
            handle_import(&cli, &settings, original, sheet, output.as_deref())
        }
        Command::Flatten { input } => handle_flatten(input),
        Command::WordCount { input } => handle_word_count(&cli, input),
    }
}

/// 初始化日志（默认 warn，--verbose 时 debug）
fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    SubscriberBuilder::default()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// 加载配置文件（未指定时使用默认值）
fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::load(path).with_context(|| format!("读取配置文件失败: {:?}", path)),
        None => Ok(Settings::default()),
    }
}

fn with_slugs(mut settings: Settings, translate_slugs: bool) -> Settings {
    settings.translate_slugs |= translate_slugs;
    settings
}

/// 读取元素文件
fn load_element(path: &Path) -> Result<Element> {
    if !path.exists() {
        bail!("元素文件不存在: {:?}", path);
    }
    DefaultElementReader
        .read(path)
        .with_context(|| format!("解析元素文件失败: {:?}", path))
}

/// 验证表格文件
fn validate_sheet(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("表格文件不存在: {:?}", path);
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    if !SUPPORTED_EXTENSIONS.iter().any(|&ext| Some(ext) == extension.as_deref()) {
        bail!("表格文件必须是 CSV 文件");
    }

    Ok(())
}

/// 输出目录：命令行 > 配置文件 > 输入文件所在目录
fn resolve_output_dir(cli_dir: Option<&Path>, settings: &Settings, input: &Path) -> PathBuf {
    cli_dir
        .map(Path::to_path_buf)
        .or_else(|| settings.output_dir.clone())
        .unwrap_or_else(|| {
            input
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
        })
}

/// 处理单个元素导出
fn handle_export(
    cli: &Cli,
    settings: &Settings,
    input: &Path,
    output_dir: Option<&Path>,
) -> Result<()> {
    let element = load_element(input)?;
    let registry = DecoratorRegistry::from_embedded_data()?;
    let dir = resolve_output_dir(output_dir, settings, input);

    let outcome = export_element(&element, &registry, settings, &DefaultSheetWriter, &dir)
        .with_context(|| format!("导出失败: {:?}", input))?;

    if !cli.quiet {
        println!("导出 {} 行", outcome.rows);
    }
    println!("{}", outcome.path.display());

    Ok(())
}

/// 处理批量导出
fn handle_export_batch(
    cli: &Cli,
    settings: &Settings,
    inputs: &[PathBuf],
    output_dir: Option<&Path>,
) -> Result<()> {
    let elements = inputs
        .iter()
        .map(|path| load_element(path))
        .collect::<Result<Vec<_>>>()?;
    let registry = DecoratorRegistry::from_embedded_data()?;
    let dir = resolve_output_dir(output_dir, settings, &inputs[0]);

    let outcomes = export_batch(&elements, &registry, settings, &DefaultSheetWriter, &dir);

    let mut failures = 0;
    for (input, outcome) in inputs.iter().zip(outcomes) {
        match outcome {
            Ok(outcome) => {
                if !cli.quiet {
                    println!("{:?} -> {} ({} 行)", input, outcome.path.display(), outcome.rows);
                }
            }
            Err(e) => {
                failures += 1;
                eprintln!("导出失败 {:?}: {}", input, e);
            }
        }
    }

    if failures > 0 {
        bail!("{} 个元素导出失败", failures);
    }
    Ok(())
}

/// 处理译文表格回写
fn handle_import(
    cli: &Cli,
    settings: &Settings,
    original: &Path,
    sheet: &Path,
    output: Option<&Path>,
) -> Result<()> {
    validate_sheet(sheet)?;
    let element = load_element(original)?;
    let registry = DecoratorRegistry::from_embedded_data()?;

    let outcome = import_element(&element, &registry, &DefaultSheetReader, sheet, settings)
        .with_context(|| format!("导入失败: {:?}", sheet))?;

    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| get_translation_output_path(original));

    if output_path.exists() {
        let backup = create_backup(&output_path)?;
        if !cli.quiet {
            println!("已创建备份文件: {:?}", backup);
        }
    }

    DefaultDocumentWriter
        .write(&outcome.document, &output_path)
        .with_context(|| format!("写入文件失败: {:?}", output_path))?;

    if !cli.quiet {
        print_import_summary(&outcome, &output_path);
    }

    Ok(())
}

/// 打印导入摘要
fn print_import_summary(outcome: &ImportOutcome, output_path: &Path) {
    let report = &outcome.report;
    println!("{}", report.summary());

    for (i, change) in report.modifications().take(3).enumerate() {
        println!("{}. {}", i + 1, change);
    }
    let modified = report.modifications().count();
    if modified > 3 {
        println!("... 还有 {} 处修改", modified - 3);
    }

    for path in report.displaced() {
        eprintln!("警告: {} 原为标量，已被替换为容器", path);
    }

    println!("结果已写入: {:?}", output_path);
}

/// 处理扁平化输出
fn handle_flatten(input: &Path) -> Result<()> {
    let doc = DefaultDocumentReader
        .read(input)
        .with_context(|| format!("读取文档失败: {:?}", input))?;

    let json_output = serde_json::to_string_pretty(&flatten(&doc)).context("序列化JSON失败")?;
    println!("{}", json_output);

    Ok(())
}

/// 处理单词统计
fn handle_word_count(cli: &Cli, input: &Path) -> Result<()> {
    let element = load_element(input)?;
    let registry = DecoratorRegistry::from_embedded_data()?;
    let count = registry.element_word_count(&element);

    if cli.quiet {
        println!("{}", count);
    } else {
        println!("{:?} 可翻译单词数: {}", input, count);
    }

    Ok(())
}

/// 获取回写输出路径
fn get_translation_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("element");
    input.with_file_name(format!("{}_translated.json", stem))
}
