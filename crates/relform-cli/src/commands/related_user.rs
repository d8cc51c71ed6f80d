//! Related user commands - show, create and update
//!
//! Each command drives the headless form controller the same way the form
//! screen would:
//! 1. `open` the form (loading the record in edit mode)
//! 2. apply the field flags and resolve `--group` names to permission groups
//! 3. `submit`, which navigates to the list route on success
//!
//! Remote failures are reported by the controller through the terminal
//! messenger, so the commands only print what the controller does not.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use relform_core::domain::{PermissionGroup, RelatedUser, RelatedUserInput};
use relform_core::usecases::{FormError, RelatedUserForm};
use tracing::debug;

use crate::context::AppContext;
use crate::output::{get_formatter, OutputFormat, OutputFormatter};

// ============================================================================
// Shared arguments and helpers
// ============================================================================

/// Editable fields of a related user
#[derive(Debug, Args)]
pub struct UserFields {
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub unique_id: Option<String>,
    #[arg(long)]
    pub business_name: Option<String>,
    /// Permission group to add, looked up by name (repeatable)
    #[arg(long = "group", value_name = "NAME")]
    pub groups: Vec<String>,
}

impl UserFields {
    fn apply(&self, value: &mut RelatedUserInput) {
        let fields = [
            (&self.email, &mut value.email),
            (&self.name, &mut value.name),
            (&self.unique_id, &mut value.unique_id),
            (&self.business_name, &mut value.business_name),
        ];
        for (flag, field) in fields {
            if let Some(flag) = flag {
                *field = Some(flag.clone());
            }
        }
    }
}

/// Outcome of matching one `--group` name against the search results
#[derive(Debug, PartialEq, Eq)]
enum GroupResolution {
    Select(PermissionGroup),
    AlreadySelected(PermissionGroup),
    Unmatched,
}

/// An exact (case-insensitive) name match wins, then a single search result
fn resolve_group(options: &[PermissionGroup], name: &str, selected: &[String]) -> GroupResolution {
    let picked = options
        .iter()
        .find(|g| g.name.eq_ignore_ascii_case(name))
        .or(match options {
            [only] => Some(only),
            _ => None,
        })
        .cloned();

    match picked {
        Some(group) if selected.contains(&group.id) => GroupResolution::AlreadySelected(group),
        Some(group) => GroupResolution::Select(group),
        None => GroupResolution::Unmatched,
    }
}

/// Resolves each name to a permission group and selects it.
///
/// Groups already selected are skipped. Unmatched names are kept as typed
/// labels, which are not submitted.
async fn add_groups(
    form: &mut RelatedUserForm,
    names: &[String],
    formatter: &dyn OutputFormatter,
) -> Result<(), FormError> {
    for name in names {
        form.set_input_text(name.as_str());
        form.search_permission_groups(name).await?;

        let selected = form.selection().ids();
        match resolve_group(form.filtered_permission_groups(), name, &selected) {
            GroupResolution::Select(group) => {
                debug!(name = %name, id = %group.id, "Permission group resolved");
                form.select_permission_group(&group);
            }
            GroupResolution::AlreadySelected(group) => {
                debug!(name = %name, id = %group.id, "Permission group already selected");
                form.set_input_text("");
            }
            GroupResolution::Unmatched => {
                formatter.warn(&format!(
                    "No single permission group matches '{}'; kept as a label only",
                    name
                ));
                form.add_typed_permission_group(name);
            }
        }
    }
    Ok(())
}

/// Prints what the controller did not already report
fn report_form_error(err: FormError, formatter: &dyn OutputFormatter) -> Result<()> {
    match err {
        FormError::Remote(e) => debug!(error = %e, "Remote failure already reported"),
        other => formatter.error(&other.to_string()),
    }
    Ok(())
}

fn print_record(
    record: &RelatedUser,
    format: OutputFormat,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    if format.is_json() {
        let json = serde_json::to_value(record).context("Failed to serialize related user")?;
        formatter.print_json(&json);
        return Ok(());
    }

    let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    formatter.field("Id", &show(&record.id));
    formatter.field("Email", &show(&record.email));
    formatter.field("Name", &show(&record.name));
    formatter.field("Unique id", &show(&record.unique_id));
    formatter.field("Business name", &show(&record.business_name));

    let groups: Vec<&str> = record
        .permission_group
        .iter()
        .map(|g| g.name.as_str())
        .collect();
    let groups = if groups.is_empty() {
        "-".to_string()
    } else {
        groups.join(", ")
    };
    formatter.field("Groups", &groups);
    Ok(())
}

/// Submits the form and prints the saved record
async fn submit(
    ctx: &AppContext,
    form: &mut RelatedUserForm,
    verb: &str,
    format: OutputFormat,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let saved = match form.submit().await {
        Ok(saved) => saved,
        Err(err) => return report_form_error(err, formatter),
    };

    formatter.success(&format!(
        "{} related user {}",
        verb,
        saved.id.as_deref().unwrap_or("(no id)")
    ));
    print_record(&saved, format, formatter)?;
    if let Some(route) = ctx.navigator.last_route() {
        formatter.info(&format!("Next: {}", route));
    }
    Ok(())
}

// ============================================================================
// show
// ============================================================================

#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Related user id
    pub id: String,
}

impl ShowCommand {
    pub async fn execute(&self, config: Option<&Path>, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let ctx = AppContext::load(config, format)?;
        let mut form = ctx.form()?;

        if let Err(err) = form.open(Some(self.id.as_str()), Vec::new()).await {
            return report_form_error(err, &*formatter);
        }

        match form.record() {
            Some(record) => print_record(record, format, &*formatter),
            None => {
                formatter.error(&format!("Related user '{}' not found", self.id));
                Ok(())
            }
        }
    }
}

// ============================================================================
// create
// ============================================================================

#[derive(Debug, Args)]
pub struct CreateCommand {
    #[command(flatten)]
    pub fields: UserFields,
}

impl CreateCommand {
    pub async fn execute(&self, config: Option<&Path>, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let ctx = AppContext::load(config, format)?;
        let mut form = ctx.form()?;

        if let Err(err) = form.open(None, Vec::new()).await {
            return report_form_error(err, &*formatter);
        }

        self.fields.apply(form.value_mut());
        if let Err(err) = add_groups(&mut form, &self.fields.groups, &*formatter).await {
            return report_form_error(err, &*formatter);
        }

        submit(&ctx, &mut form, "Created", format, &*formatter).await
    }
}

// ============================================================================
// update
// ============================================================================

#[derive(Debug, Args)]
pub struct UpdateCommand {
    /// Related user id
    pub id: String,

    #[command(flatten)]
    pub fields: UserFields,

    /// Permission group label to remove (repeatable)
    #[arg(long = "remove-group", value_name = "NAME")]
    pub remove_groups: Vec<String>,
}

impl UpdateCommand {
    pub async fn execute(&self, config: Option<&Path>, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let ctx = AppContext::load(config, format)?;
        let mut form = ctx.form()?;

        if let Err(err) = form.open(Some(self.id.as_str()), Vec::new()).await {
            return report_form_error(err, &*formatter);
        }

        self.fields.apply(form.value_mut());

        for label in &self.remove_groups {
            if !form.selection().labels().contains(&label.as_str()) {
                formatter.warn(&format!("'{}' is not selected", label));
                continue;
            }
            form.remove_permission_group(label);
        }

        if let Err(err) = add_groups(&mut form, &self.fields.groups, &*formatter).await {
            return report_form_error(err, &*formatter);
        }

        submit(&ctx, &mut form, "Updated", format, &*formatter).await
    }
}
