//! 터미널 출력 포맷팅 유틸리티
//!
//! 부팅 과정(리포지토리 초기화)을 시각적으로 표시합니다.

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║           🔄 INITIALIZING REPOSITORIES           ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    let border = "═".repeat(50);

    println!("╔{}╗", border);
    println!("║{:^49}║", title);
    println!("╚{}╝", border);
}

/// 진행 단계 시작을 표시합니다
pub fn print_step_start(step: u8, description: &str) {
    println!("\n→ Step {}: {}", step, description);
}

/// 진행 단계 완료를 표시합니다
pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

/// 하위 작업 상태를 들여쓰기하여 출력합니다
pub fn print_sub_task(name: &str, status: &str) {
    println!("    • {:<28} {}", name, status);
}

/// 초기화 결과 요약을 출력합니다
pub fn print_final_summary(repos: usize, instances: usize) {
    println!();
    println!("┌──────────────────────────────────────────────────┐");
    println!("│ Repositories initialized: {:<23}│", repos);
    println!("│ Registered instances:     {:<23}│", instances);
    println!("└──────────────────────────────────────────────────┘");
}
