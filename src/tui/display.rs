//! 命令行输出模块
//!
//! 非交互模式下的视图与目录打印。

use crate::catalog::ReferenceCatalog;
use crate::wizard::{DetailsBundle, ViewPayload};
use std::fmt::Write;

/// 是否运行交互模式（无参数时启用）
pub fn should_run_interactive() -> bool {
    std::env::args().len() == 1
}

/// 将视图格式化为纯文本
pub fn format_view(view: &ViewPayload) -> String {
    let mut out = String::new();
    match view {
        ViewPayload::Selection { options } => {
            let _ = writeln!(out, "📍 Where do you want to set up your business?");
            push_options(&mut out, options);
        }
        ViewPayload::Subtype { category, options } => {
            let _ = writeln!(out, "🏢 Select your {} structure:", category);
            push_options(&mut out, options);
        }
        ViewPayload::Details(details) => push_details(&mut out, details),
    }
    out
}

/// 将目录格式化为纯文本
pub fn format_catalog(catalog: &ReferenceCatalog) -> String {
    let mut out = String::new();
    for category in catalog.categories() {
        let _ = writeln!(out, "{}", category);
        for structure in catalog.structures(category).unwrap_or_default() {
            let marker = if catalog.features(category, structure).is_some() {
                "•"
            } else {
                "◦"
            };
            let _ = writeln!(out, "  {} {}", marker, structure);
        }
    }
    out
}

/// 打印视图
pub fn print_view(view: &ViewPayload) {
    print!("{}", format_view(view));
}

fn push_options(out: &mut String, options: &[String]) {
    for (i, option) in options.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, option);
    }
}

fn push_details(out: &mut String, details: &DetailsBundle) {
    let rule = "─".repeat(60);
    let _ = writeln!(out, "{}", "═".repeat(60));
    let _ = writeln!(out, "🔎 Features of {} ({})", details.structure, details.category);
    let _ = writeln!(out, "{}", rule);
    push_lines(out, &details.features);

    if !details.market_benefits.is_empty() {
        let _ = writeln!(out, "\n📈 Market Benefits");
        let _ = writeln!(out, "{}", rule);
        if let Some(label) = &details.market_label {
            let _ = writeln!(out, "  {}", label);
        }
        for benefit in &details.market_benefits {
            let _ = writeln!(out, "  - {}", benefit);
        }
    }

    let _ = writeln!(out, "\n📜 Legal Requirements");
    let _ = writeln!(out, "{}", rule);
    push_lines(out, &details.legal_requirements);

    if !details.support_services.is_empty() {
        let _ = writeln!(out, "\n🛠️ Our Support Includes");
        let _ = writeln!(out, "{}", rule);
        push_lines(out, &details.support_services);
    }

    let _ = writeln!(out, "\n📞 Chat with {} Business Expert", details.contact.label);
    let _ = writeln!(out, "  {}", details.contact.link);
    let _ = writeln!(out, "{}", "═".repeat(60));
}

fn push_lines(out: &mut String, lines: &[String]) {
    for line in lines {
        let _ = writeln!(out, "  {}", line);
    }
}
