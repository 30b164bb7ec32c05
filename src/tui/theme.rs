//! 主题模块
//!
//! 提供统一的主题定义。

use ratatui::style::{Color, Modifier, Style};

/// 布局与符号常量
pub mod config {
    /// 列表高亮符号
    pub const HIGHLIGHT_SYMBOL: &str = "▶ ";
    /// 详情页左右两栏宽度百分比
    pub const DETAILS_COLUMN_PERCENT: u16 = 50;
}

/// 主题颜色配置
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// 背景色
    pub bg: Color,
    /// 前景色
    pub fg: Color,
    /// 强调色
    pub accent: Color,
    /// 选中项背景色
    pub selected_bg: Color,
    /// 选中项前景色
    pub selected_fg: Color,
    /// 成功色（联系按钮）
    pub success: Color,
    /// 警告色
    pub warning: Color,
    /// 错误色
    pub error: Color,
    /// 提示/次要文字色
    pub hint: Color,
    /// 边框色
    pub border: Color,
    /// 标题颜色
    pub title: Color,
}

impl Default for Theme {
    fn default() -> Self {
        THEME
    }
}

impl Theme {
    /// 普通文本样式
    pub fn normal(&self) -> Style {
        Style::new().fg(self.fg).bg(self.bg)
    }

    /// 标题样式
    pub fn title(&self) -> Style {
        Style::new()
            .fg(self.title)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// 小节标题样式
    pub fn heading(&self) -> Style {
        Style::new()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// 选中项样式
    pub fn selected(&self) -> Style {
        Style::new()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// 边框样式
    pub fn border(&self) -> Style {
        Style::new().fg(self.border).bg(self.bg)
    }

    /// 提示文本样式
    pub fn hint(&self) -> Style {
        Style::new().fg(self.hint).bg(self.bg)
    }

    /// 成功样式
    pub fn success(&self) -> Style {
        Style::new().fg(self.success).bg(self.bg)
    }

    /// 警告样式
    pub fn warning(&self) -> Style {
        Style::new().fg(self.warning).bg(self.bg)
    }

    /// 错误样式
    pub fn error(&self) -> Style {
        Style::new().fg(self.error).bg(self.bg)
    }
}

/// 全局主题实例
pub static THEME: Theme = Theme {
    bg: Color::Black,
    fg: Color::White,
    accent: Color::Cyan,
    selected_bg: Color::Cyan,
    selected_fg: Color::Black,
    success: Color::Green,
    warning: Color::Yellow,
    error: Color::Red,
    hint: Color::Gray,
    border: Color::Cyan,
    title: Color::Cyan,
};

/// 获取全局主题引用
pub fn theme() -> &'static Theme {
    &THEME
}
