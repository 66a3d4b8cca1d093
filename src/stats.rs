//! 통계 및 유틸리티 모듈
//!
//! 변환/병합 처리 통계 수집 및 포맷팅을 담당합니다.

use colored::Colorize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// 처리 통계 구조체
#[derive(Debug, Default)]
pub struct Statistics {
    /// 총 소스 파일 수
    pub total_sources: usize,
    /// 디코딩 성공 수
    pub decoded_count: AtomicUsize,
    /// 디코딩 실패 수
    pub error_count: AtomicUsize,
    /// 병합된 레코드 수
    pub records_merged: AtomicU64,
    /// 읽은 총 바이트
    pub total_bytes_read: AtomicU64,
    /// 쓴 총 바이트
    pub total_bytes_written: AtomicU64,
    /// 처리 시작 시간
    start_time: Option<Instant>,
}

impl Statistics {
    /// 새 통계 인스턴스 생성
    pub fn new(total_sources: usize) -> Self {
        Self {
            total_sources,
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// 디코딩 성공 카운트 증가
    pub fn increment_decoded(&self) {
        self.decoded_count.fetch_add(1, Ordering::Relaxed);
    }

    /// 디코딩 실패 카운트 증가
    pub fn increment_error(&self) {
        self.error_count.fetch_add(1, Ordering::Relaxed);
    }

    /// 병합된 레코드 수 추가
    pub fn add_records_merged(&self, count: u64) {
        self.records_merged.fetch_add(count, Ordering::Relaxed);
    }

    /// 읽은 바이트 추가
    pub fn add_bytes_read(&self, bytes: u64) {
        self.total_bytes_read.fetch_add(bytes, Ordering::Relaxed);
    }

    /// 쓴 바이트 추가
    pub fn add_bytes_written(&self, bytes: u64) {
        self.total_bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    /// 디코딩 성공 수 반환
    pub fn get_decoded_count(&self) -> usize {
        self.decoded_count.load(Ordering::Relaxed)
    }

    /// 디코딩 실패 수 반환
    pub fn get_error_count(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }

    /// 병합된 레코드 수 반환
    pub fn get_records_merged(&self) -> u64 {
        self.records_merged.load(Ordering::Relaxed)
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// 변환 통계 요약 출력
    pub fn print_summary(&self) {
        let decoded = self.get_decoded_count();
        let errors = self.get_error_count();
        let records = self.get_records_merged();
        let bytes_read = self.total_bytes_read.load(Ordering::Relaxed);
        let bytes_written = self.total_bytes_written.load(Ordering::Relaxed);
        let elapsed = self.elapsed();

        println!("\n{}", "═".repeat(50).bright_blue());
        println!("{}", " 📊 변환 통계".bright_white().bold());
        println!("{}", "═".repeat(50).bright_blue());

        println!(
            "  {} 전체 소스:    {}",
            "📁".bright_cyan(),
            self.total_sources
        );
        println!(
            "  {} 디코딩 성공:  {}",
            "✅".bright_green(),
            decoded.to_string().green()
        );

        if errors > 0 {
            println!(
                "  {} 디코딩 실패:  {}",
                "❌".bright_red(),
                errors.to_string().red()
            );
        } else {
            println!("  {} 디코딩 실패:  {}", "✅".bright_green(), "0".green());
        }

        println!(
            "  {} 병합 레코드:  {}",
            "📦".bright_white(),
            records.to_string().bright_green()
        );
        println!(
            "  {} 입력 용량:    {}",
            "📥".bright_yellow(),
            format_bytes(bytes_read)
        );
        println!(
            "  {} 출력 용량:    {}",
            "📤".bright_magenta(),
            format_bytes(bytes_written)
        );
        println!(
            "  {} 처리 시간:    {:.2}초",
            "⏱️".bright_cyan(),
            elapsed.as_secs_f64()
        );

        println!("{}", "═".repeat(50).bright_blue());
    }

    /// 스키마 검사 통계 요약 출력
    pub fn print_check_summary(&self) {
        let decoded = self.get_decoded_count();
        let errors = self.get_error_count();
        let elapsed = self.elapsed();

        println!("\n{}", "═".repeat(50).bright_blue());
        println!("{}", " 🔍 스키마 검사 결과".bright_white().bold());
        println!("{}", "═".repeat(50).bright_blue());

        println!(
            "  {} 전체 소스:    {}",
            "📁".bright_cyan(),
            self.total_sources
        );
        println!(
            "  {} 유효:         {}",
            "✅".bright_green(),
            decoded.to_string().green()
        );

        if errors > 0 {
            println!(
                "  {} 무효:         {}",
                "❌".bright_red(),
                errors.to_string().red()
            );
        } else {
            println!("  {} 무효:         {}", "✅".bright_green(), "0".green());
        }

        println!(
            "  {} 검사 시간:    {:.2}초",
            "⏱️".bright_cyan(),
            elapsed.as_secs_f64()
        );

        println!("{}", "═".repeat(50).bright_blue());
    }
}

/// 바이트를 읽기 쉬운 형식으로 변환
///
/// # Examples
/// ```
/// use tconvert::stats::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1048576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
