//! 应用状态

use crate::error::Error;
use crate::tui::state::selection::{Selectable, SelectionState};
use crate::wizard::{Stage, ViewPayload, WizardController, WizardSession};
use tracing::{error, info};

/// 屏幕枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// 向导
    #[default]
    Wizard,
    /// 退出确认
    Exit,
}

/// 状态消息级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

/// 底部状态消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

/// TUI 运行结果
#[derive(Debug)]
pub struct TuiResult {
    /// 退出时的会话
    pub session: WizardSession,
    /// 用户保存的联系链接
    pub contact_link: Option<String>,
}

/// 应用状态（包含 UI 状态）
#[derive(Debug, Default)]
pub struct AppState {
    /// 当前屏幕
    pub current_screen: Screen,
    /// 向导会话
    pub session: WizardSession,
    /// 当前视图
    pub view: Option<ViewPayload>,
    /// 选项列表状态
    pub selection: SelectionState,
    /// 状态消息
    pub status: Option<StatusMessage>,
    /// 保存的联系链接
    pub contact_link: Option<String>,
    /// 是否退出
    pub should_exit: bool,
}

impl AppState {
    /// 创建状态并计算初始视图
    pub fn new(controller: &WizardController<'_>) -> Self {
        let mut state = Self::default();
        state.show(controller, WizardSession::new());
        state
    }

    /// 当前阶段
    pub fn stage(&self) -> Stage {
        self.session.stage()
    }

    /// 当前高亮的选项
    pub fn highlighted_option(&self) -> Option<&str> {
        let view = self.view.as_ref()?;
        let index = self.selection.selected()?;
        view.options().get(index).map(String::as_str)
    }

    /// 用高亮选项前进
    pub fn confirm(&mut self, controller: &WizardController<'_>) {
        let Some(choice) = self.highlighted_option().map(str::to_string) else {
            return;
        };
        let result = controller.advance(&self.session, &choice);
        self.apply(controller, result);
    }

    /// 返回上一步
    pub fn go_back(&mut self, controller: &WizardController<'_>) {
        if self.stage() == Stage::Selection {
            return;
        }
        let result = controller.back(&self.session);
        self.apply(controller, result);
    }

    /// 重新开始
    pub fn restart(&mut self, controller: &WizardController<'_>) {
        let session = controller.restart(&self.session);
        self.show(controller, session);
    }

    /// 保存联系链接，退出后打印
    pub fn save_contact_link(&mut self) {
        if let Some(ViewPayload::Details(details)) = &self.view {
            info!(link = %details.contact.link, "Contact link saved");
            self.contact_link = Some(details.contact.link.clone());
            self.status = Some(StatusMessage {
                kind: StatusKind::Info,
                text: format!(
                    "Link to the {} expert saved; it will be printed on exit",
                    details.contact.label
                ),
            });
        }
    }

    /// 生成运行结果
    pub fn into_result(self) -> TuiResult {
        TuiResult {
            session: self.session,
            contact_link: self.contact_link,
        }
    }

    fn apply(
        &mut self,
        controller: &WizardController<'_>,
        result: crate::Result<WizardSession>,
    ) {
        match result {
            Ok(session) => self.show(controller, session),
            Err(e) => self.report(e),
        }
    }

    /// 视图渲染成功后才提交会话，失败时保持原状态
    fn show(&mut self, controller: &WizardController<'_>, session: WizardSession) {
        let view = match controller.current_view(&session) {
            Ok(view) => view,
            Err(e) => return self.report(e),
        };

        self.selection = SelectionState::with_count(view.options().len());
        // 返回类别页时保留之前的类别
        if let (ViewPayload::Selection { options }, Some(category)) = (&view, session.category())
            && let Some(index) = options.iter().position(|o| o == category)
        {
            self.selection.select(index);
        }
        self.session = session;
        self.view = Some(view);
        self.status = None;
    }

    fn report(&mut self, e: Error) {
        let kind = if e.is_recoverable() {
            StatusKind::Warning
        } else {
            error!(error = %e, stage = %self.session.stage(), "Wizard integration error");
            StatusKind::Error
        };
        self.status = Some(StatusMessage {
            kind,
            text: e.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ReferenceCatalog;

    fn catalog() -> ReferenceCatalog {
        ReferenceCatalog::builtin().unwrap()
    }

    #[test]
    fn test_initial_state() {
        let catalog = catalog();
        let controller = WizardController::new(&catalog);
        let state = AppState::new(&controller);
        assert_eq!(state.stage(), Stage::Selection);
        assert_eq!(state.highlighted_option(), Some("Setup in India"));
        assert!(state.status.is_none());
    }

    #[test]
    fn test_confirm_walks_to_details() {
        let catalog = catalog();
        let controller = WizardController::new(&catalog);
        let mut state = AppState::new(&controller);

        state.selection.next();
        state.confirm(&controller);
        assert_eq!(state.stage(), Stage::Subtype);
        assert_eq!(state.session.category(), Some("Setup in UK"));
        assert_eq!(state.highlighted_option(), Some("Limited Company"));

        state.confirm(&controller);
        assert_eq!(state.stage(), Stage::Details);
        assert!(matches!(state.view, Some(ViewPayload::Details(_))));
        assert_eq!(state.highlighted_option(), None);

        // 详情页无法继续前进
        state.confirm(&controller);
        assert_eq!(state.stage(), Stage::Details);
    }

    #[test]
    fn test_back_restores_category_highlight() {
        let catalog = catalog();
        let controller = WizardController::new(&catalog);
        let mut state = AppState::new(&controller);

        state.selection.last();
        state.confirm(&controller);
        state.go_back(&controller);
        assert_eq!(state.stage(), Stage::Selection);
        assert_eq!(state.highlighted_option(), Some("India-UK Cross Border"));

        // 首页返回无效果
        state.go_back(&controller);
        assert_eq!(state.stage(), Stage::Selection);
        assert!(state.status.is_none());
    }

    #[test]
    fn test_save_link_and_restart() {
        let catalog = catalog();
        let controller = WizardController::new(&catalog);
        let mut state = AppState::new(&controller);
        state.confirm(&controller);
        state.confirm(&controller);

        state.save_contact_link();
        let link = state.contact_link.clone().unwrap();
        assert!(link.starts_with("https://wa.me/917975931377?text="));
        assert_eq!(state.status.as_ref().unwrap().kind, StatusKind::Info);

        state.restart(&controller);
        assert_eq!(state.stage(), Stage::Selection);
        assert!(state.session.selections().is_empty());

        let result = state.into_result();
        assert_eq!(result.contact_link, Some(link));
    }

    #[test]
    fn test_unrenderable_session_keeps_previous_view() {
        let catalog = catalog();
        let controller = WizardController::new(&catalog);
        let mut state = AppState::new(&controller);
        state.confirm(&controller);
        let before = state.view.clone();

        // A session from another catalog names a category this one lacks
        let other = ReferenceCatalog::from_toml_str(
            r#"
[[category]]
name = "Setup in Mars"
structures = ["Dome Company"]

[category.contact]
identifier = "+100"
label = "Mars"
"#,
        )
        .unwrap();
        let foreign = WizardController::new(&other).walk(["Setup in Mars"]);
        state.apply(&controller, foreign);

        assert_eq!(state.stage(), Stage::Subtype);
        assert_eq!(state.session.category(), Some("Setup in India"));
        assert_eq!(state.view, before);
        assert_eq!(state.view.as_ref().map(ViewPayload::stage), Some(state.stage()));
        assert_eq!(state.status.as_ref().unwrap().kind, StatusKind::Error);
    }

    #[test]
    fn test_save_link_outside_details_is_noop() {
        let catalog = catalog();
        let controller = WizardController::new(&catalog);
        let mut state = AppState::new(&controller);
        state.save_contact_link();
        assert!(state.contact_link.is_none());
        assert!(state.status.is_none());
    }
}
