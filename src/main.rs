//! tconvert - TABULAR DATA FORMAT CONVERTER
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::SystemTime;
use walkdir::WalkDir;

use tconvert::{
    cli::{Args, WriteMode},
    convert::{encode_records, ConvertOptions, Format},
    merge::{aggregate, Source},
    pattern::SourceFilter,
    processor::{process_source, ProcessOptions, SourceResult},
    stats::Statistics,
};

fn main() -> Result<()> {
    let args = Args::parse();

    // 스레드 풀 설정
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("스레드 풀 초기화 실패")?;
    }

    // 입력 경로 확인
    validate_input(&args)?;

    let from = args.resolve_from();
    let to = args.to;

    // 동일 형식 간 변환은 호출자 오류 (검사 모드는 인코딩하지 않으므로 허용)
    if !args.check && from == to {
        anyhow::bail!("지원하지 않는 변환입니다: {} -> {}", from, to);
    }

    // 헤더 출력
    print_header(&args, from, to);

    // 소스 필터 초기화
    let filter =
        SourceFilter::new(from, args.pattern.clone()).map_err(|e| anyhow::anyhow!("{}", e))?;

    // 입력 파일 수집
    let source_files = collect_source_files(&args, &filter)?;

    if source_files.is_empty() {
        println!("{}", "⚠️ 처리할 입력 파일이 없습니다.".yellow());
        return Ok(());
    }

    println!(
        "  {} 발견된 파일 수: {}",
        "📋".bright_white(),
        source_files.len().to_string().bright_green()
    );

    // 통계 초기화
    let stats = Statistics::new(source_files.len());

    // 드라이런 모드
    if args.dry_run {
        print_dry_run(&source_files);
        return Ok(());
    }

    // 스키마 검사 모드
    if args.check {
        return run_check_mode(&args, source_files, from, &stats);
    }

    // 일반 변환 모드
    run_conversion_mode(&args, source_files, from, to, &stats)
}

/// 입력 경로 유효성 검사
fn validate_input(args: &Args) -> Result<()> {
    if !args.input.exists() {
        anyhow::bail!("입력 경로가 존재하지 않습니다: {:?}", args.input);
    }

    Ok(())
}

/// 헤더 출력
fn print_header(args: &Args, from: Format, to: Format) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!(
        "{}",
        " 🔄 TABULAR DATA FORMAT CONVERTER".bright_white().bold()
    );
    println!("{}", "═".repeat(50).bright_blue());
    println!("  {} 입력 경로: {:?}", "📂".bright_cyan(), args.input);
    println!(
        "  {} 변환 방향: {} -> {}",
        "🧭".bright_white(),
        from.to_string().bright_yellow(),
        to.to_string().bright_green()
    );

    if !args.check {
        if let Some(ref output) = args.output {
            println!("  {} 출력 파일: {:?}", "📄".bright_green(), output);
        }
        println!("  {} 모드: {}", "⚙️".bright_yellow(), args.mode);
    }

    if let Some(ref pattern) = args.pattern {
        println!("  {} 패턴 필터: {}", "🔍".bright_magenta(), pattern);
    }

    if args.data_key != "data" {
        println!("  {} 컨테이너 키: {}", "🔑".bright_cyan(), args.data_key);
    }

    if let Some(depth) = args.max_depth {
        println!("  {} 최대 깊이: {}", "📏".bright_white(), depth);
    }

    if args.dry_run {
        println!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "드라이런 모드 (실제 변환 없음)".yellow()
        );
    }

    if args.check {
        println!("  {} {}", "🔍".bright_cyan(), "스키마 검사 모드".cyan());
    }

    if args.pretty {
        println!(
            "  {} {}",
            "✨".bright_magenta(),
            "Pretty 출력 모드".magenta()
        );
    }

    println!("{}", "═".repeat(50).bright_blue());
    println!("\n{}", "📁 파일 검색 중...".bright_cyan());
}

/// 입력 파일 수집
///
/// 입력이 파일이면 그대로 사용하고, 폴더이면 소스 형식의 확장자와
/// 패턴에 맞는 파일을 탐색합니다. 병합 순서가 파일 시스템 순회
/// 순서에 의존하지 않도록 경로 기준으로 정렬합니다.
fn collect_source_files(args: &Args, filter: &SourceFilter) -> Result<Vec<PathBuf>> {
    if args.input.is_file() {
        return Ok(vec![args.input.clone()]);
    }

    let walker = if let Some(max_depth) = args.max_depth {
        WalkDir::new(&args.input).max_depth(max_depth)
    } else {
        WalkDir::new(&args.input)
    };

    let mut source_files: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| {
            e.path()
                .file_name()
                .and_then(|s| s.to_str())
                .map(|s| filter.matches(s))
                .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    source_files.sort();

    Ok(source_files)
}

/// 드라이런 출력
fn print_dry_run(source_files: &[PathBuf]) {
    println!("\n{}", "📋 처리 예정 파일 목록:".bright_cyan());
    for (i, path) in source_files.iter().enumerate() {
        println!("  {}. {:?}", i + 1, path.file_name().unwrap_or_default());
    }
    println!(
        "\n{} 총 {} 개의 파일이 병합 순서대로 처리될 예정입니다.",
        "ℹ️".bright_blue(),
        source_files.len().to_string().bright_green()
    );
}

/// 소스 파일들을 병렬로 디코딩하고 입력 순서대로 수집
///
/// rayon의 `collect`는 입력 순서를 보존하므로 병합 순서가 I/O 완료
/// 순서에 의존하지 않습니다.
fn decode_sources(
    source_files: Vec<PathBuf>,
    options: &ProcessOptions,
    pb: &ProgressBar,
) -> Vec<SourceResult> {
    source_files
        .into_par_iter()
        .map(|path| {
            let result = process_source(path, options);
            pb.inc(1);
            result
        })
        .collect()
}

/// 디코딩 결과를 성공 소스와 에러 목록으로 분리
fn split_results(
    results: Vec<SourceResult>,
    args: &Args,
    stats: &Statistics,
) -> (Vec<Source>, Vec<(PathBuf, String)>) {
    let mut sources = Vec::new();
    let mut errors = Vec::new();

    for result in results {
        stats.add_bytes_read(result.file_size);
        let name = result.source_name();

        let SourceResult {
            path,
            records,
            error,
            ..
        } = result;

        match records {
            Some(records) => {
                stats.increment_decoded();

                if args.verbose {
                    println!(
                        "  {} {:?} ({} 레코드)",
                        "✓".green(),
                        path.file_name().unwrap_or_default(),
                        records.len()
                    );
                }

                sources.push(Source::new(name, records));
            }
            None => {
                stats.increment_error();
                errors.push((path, error.unwrap_or_default()));
            }
        }
    }

    (sources, errors)
}

/// 스키마 검사 모드 실행
fn run_check_mode(
    args: &Args,
    source_files: Vec<PathBuf>,
    from: Format,
    stats: &Statistics,
) -> Result<()> {
    let pb = create_progress_bar(source_files.len());

    println!("\n{}", "🔍 디코딩 및 스키마 검사 중...".bright_cyan());

    let options = ProcessOptions::new(from)
        .with_convert(ConvertOptions::new().with_data_key(args.data_key.clone()));

    let results = decode_sources(source_files, &options, &pb);
    pb.finish_with_message("완료!");

    let (sources, errors) = split_results(results, args, stats);

    print_errors(&errors, args.verbose);
    if let Some(ref log_path) = args.log {
        write_error_log(log_path, &errors)?;
    }

    if !errors.is_empty() {
        stats.print_check_summary();
        anyhow::bail!("{} 개의 소스 디코딩에 실패했습니다", errors.len());
    }

    match aggregate(sources) {
        Ok(merged) => {
            stats.add_records_merged(merged.len() as u64);
            stats.print_check_summary();
            println!(
                "\n{} 모든 소스의 스키마가 일치합니다 (총 {} 레코드)\n",
                "✅".bright_green(),
                merged.len().to_string().bright_green()
            );
            Ok(())
        }
        Err(e) => {
            stats.print_check_summary();
            Err(e.into())
        }
    }
}

/// 변환 모드 실행
fn run_conversion_mode(
    args: &Args,
    source_files: Vec<PathBuf>,
    from: Format,
    to: Format,
    stats: &Statistics,
) -> Result<()> {
    // 출력 경로 결정 및 모드 확인
    let output = resolve_output_path(args, to);
    if args.mode == WriteMode::Error && output.exists() {
        anyhow::bail!("출력 파일이 이미 존재합니다: {:?}", output);
    }

    let pb = create_progress_bar(source_files.len());

    let convert_options = ConvertOptions::new()
        .with_data_key(args.data_key.clone())
        .with_pretty(args.pretty);
    let options = ProcessOptions::new(from).with_convert(convert_options.clone());

    // 병렬 디코딩 (팬아웃), 입력 순서대로 수집 (팬인)
    println!("\n{}", "⚡ 병렬 디코딩 중...".bright_cyan());

    let results = decode_sources(source_files, &options, &pb);
    pb.finish_with_message("완료!");

    let (sources, errors) = split_results(results, args, stats);

    // 실패한 소스가 하나라도 있으면 부분 출력 없이 전체 중단
    if !errors.is_empty() {
        print_errors(&errors, args.verbose);
        if let Some(ref log_path) = args.log {
            write_error_log(log_path, &errors)?;
        }
        stats.print_summary();
        anyhow::bail!("{} 개의 소스 디코딩에 실패하여 변환을 중단합니다", errors.len());
    }

    // 스키마 검증 + 병합
    let merged = aggregate(sources)?;
    stats.add_records_merged(merged.len() as u64);

    // 타깃 형식으로 인코딩
    let converted = encode_records(&merged, to, &convert_options)?;

    // 결과 저장
    println!("\n{}", "💾 결과 저장 중...".bright_cyan());

    ensure_container(&output)?;
    let output_file = open_output_file(args, &output)?;
    let mut writer = BufWriter::new(output_file);
    writeln!(writer, "{}", converted)?;
    writer.flush()?;

    stats.add_bytes_written(converted.len() as u64 + 1); // +1 for newline

    // 통계 출력
    stats.print_summary();

    println!("\n{} 저장 완료: {:?}\n", "✅".bright_green(), output);

    Ok(())
}

/// 출력 경로 결정 (미지정 시 타임스탬프 기반 이름 생성)
fn resolve_output_path(args: &Args, to: Format) -> PathBuf {
    match args.output {
        Some(ref output) => output.clone(),
        None => PathBuf::from(format!(
            "converted_{}.{}",
            unix_timestamp(),
            to.extension()
        )),
    }
}

/// 출력 파일의 상위 폴더 생성
fn ensure_container(output: &PathBuf) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("출력 폴더를 만들 수 없습니다: {:?}", parent))?;
        }
    }
    Ok(())
}

/// 출력 파일 열기
fn open_output_file(args: &Args, output: &PathBuf) -> Result<File> {
    let file = match args.mode {
        WriteMode::Append => OpenOptions::new()
            .create(true)
            .append(true)
            .open(output)?,
        _ => File::create(output)?,
    };
    Ok(file)
}

/// 진행률 바 생성
fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap()
            .progress_chars("█▓▒░"),
    );
    pb
}

/// 에러 목록 출력
fn print_errors(errors: &[(PathBuf, String)], verbose: bool) {
    if errors.is_empty() {
        return;
    }

    println!("\n{}", "❌ 오류 발생 파일:".bright_red());
    for (path, error) in errors {
        println!("  {} {:?}", "•".red(), path.file_name().unwrap_or_default());
        if verbose {
            println!("    {}", error.dimmed());
        }
    }
}

/// 에러 로그 파일 작성
fn write_error_log(log_path: &PathBuf, errors: &[(PathBuf, String)]) -> Result<()> {
    let mut log_file = File::create(log_path)?;

    writeln!(log_file, "tconvert 에러 로그")?;
    writeln!(log_file, "생성 시간: Unix timestamp: {}", unix_timestamp())?;
    writeln!(log_file, "총 에러 수: {}", errors.len())?;
    writeln!(log_file, "{}", "=".repeat(50))?;

    for (path, error) in errors {
        writeln!(log_file, "\n파일: {:?}", path)?;
        writeln!(log_file, "에러: {}", error)?;
    }

    println!("\n{} 에러 로그 저장: {:?}", "📝".bright_cyan(), log_path);

    Ok(())
}

/// 현재 Unix 타임스탬프 (초)
fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
