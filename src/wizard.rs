//! Wizard navigation state machine
//!
//! Three linear stages: pick a category, pick a structure within it, then
//! read the composed details. Sessions are plain values; every transition
//! takes the current session by reference and returns the next one, so a
//! rejected transition leaves the caller's session untouched.

use crate::catalog::ReferenceCatalog;
use crate::config::Config;
use crate::contact::{self, ContactPayload};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Default single-entry feature list for structures without catalog features
pub const DEFAULT_PLACEHOLDER_FEATURE: &str = "Details coming soon.";

/// Wizard stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Choose a category
    #[default]
    Selection,
    /// Choose a structure within the category
    Subtype,
    /// Show the composed details
    Details,
}

impl Stage {
    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Selection => "selection",
            Stage::Subtype => "subtype",
            Stage::Details => "details",
        }
    }

    /// Stage that follows this one, if any
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::Selection => Some(Stage::Subtype),
            Stage::Subtype => Some(Stage::Details),
            Stage::Details => None,
        }
    }

    /// Stage that precedes this one, if any
    pub fn prev(&self) -> Option<Stage> {
        match self {
            Stage::Selection => None,
            Stage::Subtype => Some(Stage::Selection),
            Stage::Details => Some(Stage::Subtype),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Choices accumulated so far
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selections {
    pub category: Option<String>,
    pub structure: Option<String>,
}

impl Selections {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.structure.is_none()
    }
}

/// Per-interaction wizard progress
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardSession {
    stage: Stage,
    selections: Selections,
}

impl WizardSession {
    /// Fresh session at the first stage
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn category(&self) -> Option<&str> {
        self.selections.category.as_deref()
    }

    pub fn structure(&self) -> Option<&str> {
        self.selections.structure.as_deref()
    }
}

/// Everything the details screen shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailsBundle {
    pub category: String,
    pub structure: String,
    pub features: Vec<String>,
    pub legal_requirements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_label: Option<String>,
    pub market_benefits: Vec<String>,
    pub support_services: Vec<String>,
    pub contact: ContactPayload,
}

/// What the front end should render for the current session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", rename_all = "lowercase")]
pub enum ViewPayload {
    Selection {
        options: Vec<String>,
    },
    Subtype {
        category: String,
        options: Vec<String>,
    },
    Details(DetailsBundle),
}

impl ViewPayload {
    /// Stage tag of this view
    pub fn stage(&self) -> Stage {
        match self {
            ViewPayload::Selection { .. } => Stage::Selection,
            ViewPayload::Subtype { .. } => Stage::Subtype,
            ViewPayload::Details(_) => Stage::Details,
        }
    }

    /// Options to pick from (empty on the details screen)
    pub fn options(&self) -> &[String] {
        match self {
            ViewPayload::Selection { options } | ViewPayload::Subtype { options, .. } => {
                options.as_slice()
            }
            ViewPayload::Details(_) => &[],
        }
    }
}

/// Drives sessions through the stages against a shared catalog
#[derive(Debug, Clone)]
pub struct WizardController<'a> {
    catalog: &'a ReferenceCatalog,
    link_host: String,
    message_template: String,
    placeholder_feature: String,
}

impl<'a> WizardController<'a> {
    /// Controller with default link and placeholder settings
    pub fn new(catalog: &'a ReferenceCatalog) -> Self {
        Self {
            catalog,
            link_host: contact::DEFAULT_LINK_HOST.to_string(),
            message_template: contact::DEFAULT_MESSAGE_TEMPLATE.to_string(),
            placeholder_feature: DEFAULT_PLACEHOLDER_FEATURE.to_string(),
        }
    }

    /// Controller using the link and placeholder settings from `config`
    pub fn from_config(catalog: &'a ReferenceCatalog, config: &Config) -> Self {
        Self {
            catalog,
            link_host: config.link_host.clone(),
            message_template: config.message_template.clone(),
            placeholder_feature: config.placeholder_feature.clone(),
        }
    }

    pub fn catalog(&self) -> &ReferenceCatalog {
        self.catalog
    }

    /// Options valid at the session's current stage
    pub fn options(&self, session: &WizardSession) -> Result<Vec<String>> {
        match session.stage {
            Stage::Selection => Ok(self.catalog.category_names()),
            Stage::Subtype => Ok(self.structures_for(session)?.to_vec()),
            Stage::Details => Ok(Vec::new()),
        }
    }

    /// Compose the view for a session
    pub fn current_view(&self, session: &WizardSession) -> Result<ViewPayload> {
        match session.stage {
            Stage::Selection => Ok(ViewPayload::Selection {
                options: self.catalog.category_names(),
            }),
            Stage::Subtype => {
                let category = required_category(session)?;
                Ok(ViewPayload::Subtype {
                    category: category.to_string(),
                    options: self.structures_for(session)?.to_vec(),
                })
            }
            Stage::Details => self.details(session).map(ViewPayload::Details),
        }
    }

    /// Record `input` as the choice for the current stage and move forward
    pub fn advance(&self, session: &WizardSession, input: &str) -> Result<WizardSession> {
        let mut next = session.clone();
        match session.stage {
            Stage::Selection => {
                if self.catalog.category(input).is_none() {
                    return Err(self.reject(session.stage, input));
                }
                next.selections.category = Some(input.to_string());
                next.selections.structure = None;
                next.stage = Stage::Subtype;
            }
            Stage::Subtype => {
                if !self.structures_for(session)?.iter().any(|s| s == input) {
                    return Err(self.reject(session.stage, input));
                }
                next.selections.structure = Some(input.to_string());
                next.stage = Stage::Details;
            }
            Stage::Details => {
                return Err(Error::InvalidState(
                    "cannot advance past the details stage".into(),
                ));
            }
        }

        debug!(from = %session.stage, to = %next.stage, choice = input, "Wizard advanced");
        Ok(next)
    }

    /// Step back one stage. Returning to the subtype stage clears the
    /// structure; the category survives until `restart`.
    pub fn back(&self, session: &WizardSession) -> Result<WizardSession> {
        let prev = session.stage.prev().ok_or_else(|| {
            Error::InvalidState("cannot go back from the selection stage".into())
        })?;

        let mut next = session.clone();
        next.stage = prev;
        if prev == Stage::Subtype {
            next.selections.structure = None;
        }

        debug!(from = %session.stage, to = %next.stage, "Wizard stepped back");
        Ok(next)
    }

    /// Return to the first stage with no selections
    pub fn restart(&self, session: &WizardSession) -> WizardSession {
        debug!(from = %session.stage, "Wizard restarted");
        WizardSession::new()
    }

    /// Start a fresh session and apply `choices` in order
    pub fn walk<I, S>(&self, choices: I) -> Result<WizardSession>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        choices
            .into_iter()
            .try_fold(WizardSession::new(), |session, choice| {
                self.advance(&session, choice.as_ref())
            })
    }

    fn reject(&self, stage: Stage, input: &str) -> Error {
        warn!(stage = %stage, choice = input, "Rejected wizard choice");
        Error::InvalidChoice {
            stage,
            choice: input.to_string(),
        }
    }

    fn structures_for(&self, session: &WizardSession) -> Result<&'a [String]> {
        let category = required_category(session)?;
        self.catalog.structures(category).ok_or_else(|| {
            Error::InvalidState(format!("category '{}' is not in the catalog", category))
        })
    }

    fn details(&self, session: &WizardSession) -> Result<DetailsBundle> {
        let category = required_category(session)?;
        let structure = session.structure().ok_or_else(|| {
            Error::InvalidState("details requested without a structure selection".into())
        })?;

        let legal = self.catalog.legal_requirements(category).ok_or_else(|| {
            Error::InvalidState(format!("category '{}' is not in the catalog", category))
        })?;
        let route = self.catalog.contact_route(category).ok_or_else(|| {
            Error::InvalidState(format!("no contact route for category '{}'", category))
        })?;

        let features = match self.catalog.features(category, structure) {
            Some(features) => features.to_vec(),
            None => {
                debug!(category, structure, "No features listed, using placeholder");
                vec![self.placeholder_feature.clone()]
            }
        };

        let message = contact::format_message(&self.message_template, category, structure);
        let link = contact::deep_link(&self.link_host, &route.identifier, &message);

        Ok(DetailsBundle {
            category: category.to_string(),
            structure: structure.to_string(),
            features,
            legal_requirements: legal.to_vec(),
            market_label: self.catalog.market_label(category).map(str::to_string),
            market_benefits: self.catalog.market_benefits(category).to_vec(),
            support_services: self.catalog.support_services().to_vec(),
            contact: ContactPayload {
                identifier: route.identifier.clone(),
                label: route.label.clone(),
                message,
                link,
            },
        })
    }
}

fn required_category(session: &WizardSession) -> Result<&str> {
    session.category().ok_or_else(|| {
        Error::InvalidState(format!(
            "{} stage requires a category selection",
            session.stage
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDIA: &str = "Setup in India";
    const PVT_LTD: &str = "Private Limited Company";

    fn catalog() -> ReferenceCatalog {
        ReferenceCatalog::builtin().unwrap()
    }

    #[test]
    fn test_new_session() {
        let session = WizardSession::new();
        assert_eq!(session.stage(), Stage::Selection);
        assert!(session.selections().is_empty());
    }

    #[test]
    fn test_selection_view_lists_categories() {
        let catalog = catalog();
        let wizard = WizardController::new(&catalog);
        let view = wizard.current_view(&WizardSession::new()).unwrap();
        assert_eq!(view.stage(), Stage::Selection);
        assert_eq!(view.options().len(), 3);
        assert_eq!(view.options()[0], INDIA);
    }

    #[test]
    fn test_advance_through_stages() {
        let catalog = catalog();
        let wizard = WizardController::new(&catalog);

        let session = wizard.advance(&WizardSession::new(), INDIA).unwrap();
        assert_eq!(session.stage(), Stage::Subtype);
        assert_eq!(session.category(), Some(INDIA));

        match wizard.current_view(&session).unwrap() {
            ViewPayload::Subtype { category, options } => {
                assert_eq!(category, INDIA);
                assert_eq!(options.len(), 4);
            }
            other => panic!("unexpected view {:?}", other),
        }

        let session = wizard.advance(&session, PVT_LTD).unwrap();
        assert_eq!(session.stage(), Stage::Details);
        assert_eq!(session.structure(), Some(PVT_LTD));
    }

    #[test]
    fn test_invalid_category_leaves_state() {
        let catalog = catalog();
        let wizard = WizardController::new(&catalog);
        let session = WizardSession::new();

        let err = wizard.advance(&session, "Not A Real Category").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidChoice { stage: Stage::Selection, .. }
        ));
        assert_eq!(session, WizardSession::new());
        assert_eq!(wizard.current_view(&session).unwrap().stage(), Stage::Selection);
    }

    #[test]
    fn test_structure_from_other_category_rejected() {
        let catalog = catalog();
        let wizard = WizardController::new(&catalog);
        let session = wizard.walk([INDIA]).unwrap();

        let err = wizard.advance(&session, "Sole Trader").unwrap_err();
        assert!(matches!(err, Error::InvalidChoice { stage: Stage::Subtype, .. }));
        assert_eq!(session.stage(), Stage::Subtype);
        assert_eq!(session.structure(), None);
    }

    #[test]
    fn test_advance_from_details_is_invalid_state() {
        let catalog = catalog();
        let wizard = WizardController::new(&catalog);
        let session = wizard.walk([INDIA, PVT_LTD]).unwrap();
        assert!(matches!(
            wizard.advance(&session, PVT_LTD),
            Err(Error::InvalidState(_))
        ));
    }

    #[test]
    fn test_back_from_selection_is_invalid_state() {
        let catalog = catalog();
        let wizard = WizardController::new(&catalog);
        assert!(matches!(
            wizard.back(&WizardSession::new()),
            Err(Error::InvalidState(_))
        ));
    }

    #[test]
    fn test_back_from_details_keeps_category() {
        let catalog = catalog();
        let wizard = WizardController::new(&catalog);
        let session = wizard.walk([INDIA, PVT_LTD]).unwrap();

        let session = wizard.back(&session).unwrap();
        assert_eq!(session.stage(), Stage::Subtype);
        assert_eq!(session.category(), Some(INDIA));
        assert_eq!(session.structure(), None);

        let session = wizard.back(&session).unwrap();
        assert_eq!(session.stage(), Stage::Selection);
        assert_eq!(session.category(), Some(INDIA));
    }

    #[test]
    fn test_reselect_category_after_back() {
        let catalog = catalog();
        let wizard = WizardController::new(&catalog);
        let session = wizard.walk([INDIA]).unwrap();
        let session = wizard.back(&session).unwrap();
        let session = wizard.advance(&session, "Setup in UK").unwrap();
        assert_eq!(session.category(), Some("Setup in UK"));
        assert!(wizard.advance(&session, "Sole Trader").is_ok());
    }

    #[test]
    fn test_restart_from_every_stage() {
        let catalog = catalog();
        let wizard = WizardController::new(&catalog);
        let sessions = [
            WizardSession::new(),
            wizard.walk([INDIA]).unwrap(),
            wizard.walk([INDIA, PVT_LTD]).unwrap(),
        ];
        for session in &sessions {
            let restarted = wizard.restart(session);
            assert_eq!(restarted.stage(), Stage::Selection);
            assert!(restarted.selections().is_empty());
        }
    }

    #[test]
    fn test_india_private_limited_details() {
        let catalog = catalog();
        let wizard = WizardController::new(&catalog);
        let session = wizard.walk([INDIA, PVT_LTD]).unwrap();

        let ViewPayload::Details(details) = wizard.current_view(&session).unwrap() else {
            panic!("expected details view");
        };
        assert_eq!(details.features.len(), 4);
        assert_eq!(details.features[0], "✅ Limited liability protection");
        assert_eq!(details.legal_requirements.len(), 4);
        assert_eq!(details.legal_requirements[0], "📝 Company registration with MCA");
        assert_eq!(details.market_benefits.len(), 3);
        assert_eq!(details.support_services.len(), 4);
        assert_eq!(details.contact.label, "India");
        assert!(
            details
                .contact
                .link
                .starts_with("https://wa.me/917975931377?text=")
        );
        assert!(details.contact.link.contains("Private%20Limited%20Company"));
    }

    #[test]
    fn test_missing_features_use_placeholder() {
        let catalog = catalog();
        let wizard = WizardController::new(&catalog);
        let session = wizard.walk([INDIA, "Proprietorship"]).unwrap();

        let ViewPayload::Details(details) = wizard.current_view(&session).unwrap() else {
            panic!("expected details view");
        };
        assert_eq!(details.features, vec![DEFAULT_PLACEHOLDER_FEATURE.to_string()]);
    }

    #[test]
    fn test_cross_border_contacts_uk() {
        let catalog = catalog();
        let wizard = WizardController::new(&catalog);
        let session = wizard
            .walk(["India-UK Cross Border", "Joint Venture"])
            .unwrap();

        let ViewPayload::Details(details) = wizard.current_view(&session).unwrap() else {
            panic!("expected details view");
        };
        assert_eq!(details.contact.label, "UK");
        assert!(details.contact.link.starts_with("https://wa.me/447712463573?text="));

        // Benefits follow the Indian market even though contact goes to the UK
        assert_eq!(details.market_label.as_deref(), Some("🇮🇳 India"));
        assert_eq!(details.market_benefits.len(), 3);
        assert_eq!(details.market_benefits[0], "Fast-growing economy (7%+ GDP growth)");
    }

    #[test]
    fn test_config_overrides_link_settings() {
        let catalog = catalog();
        let config = Config {
            link_host: "chat.example.com".into(),
            message_template: "{category}/{structure}".into(),
            placeholder_feature: "TBD".into(),
            ..Default::default()
        };
        let wizard = WizardController::from_config(&catalog, &config);
        let session = wizard.walk(["Setup in UK", "Partnership"]).unwrap();

        let ViewPayload::Details(details) = wizard.current_view(&session).unwrap() else {
            panic!("expected details view");
        };
        assert_eq!(details.features, vec!["TBD".to_string()]);
        assert_eq!(details.contact.message, "Setup in UK/Partnership");
        assert_eq!(
            details.contact.link,
            "https://chat.example.com/447712463573?text=Setup%20in%20UK%2FPartnership"
        );
    }

    #[test]
    fn test_view_without_selections_is_invalid_state() {
        let catalog = catalog();
        let wizard = WizardController::new(&catalog);
        let session: WizardSession =
            serde_json::from_str(r#"{"stage":"details","selections":{"category":null,"structure":null}}"#)
                .unwrap();
        assert!(matches!(
            wizard.current_view(&session),
            Err(Error::InvalidState(_))
        ));
    }

    #[test]
    fn test_view_with_unknown_category_is_invalid_state() {
        let catalog = catalog();
        let wizard = WizardController::new(&catalog);
        let session: WizardSession = serde_json::from_str(
            r#"{"stage":"subtype","selections":{"category":"Mars","structure":null}}"#,
        )
        .unwrap();
        assert!(matches!(
            wizard.current_view(&session),
            Err(Error::InvalidState(_))
        ));
    }

    #[test]
    fn test_details_view_serializes_with_stage_tag() {
        let catalog = catalog();
        let wizard = WizardController::new(&catalog);
        let session = wizard.walk([INDIA, PVT_LTD]).unwrap();
        let json = serde_json::to_value(wizard.current_view(&session).unwrap()).unwrap();
        assert_eq!(json["stage"], "details");
        assert_eq!(json["structure"], PVT_LTD);
        assert_eq!(json["contact"]["label"], "India");
    }
}
