// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of EdgeProv.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Table output for the CLI.

use comfy_table::{Attribute, Cell, Color, Table, presets::UTF8_FULL};
use edgeprov_core::{ConfigurationReport, SchedulerOutcome};
use edgeprov_types::{ConfigSnapshot, ConfigurationObject, ConfigurationStatus};

/// Formatter for pretty tables
#[derive(Debug)]
pub struct TableFormatter;

fn header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|name| Cell::new(name).add_attribute(Attribute::Bold))
        .collect()
}

fn status_cell(status: ConfigurationStatus) -> Cell {
    let cell = Cell::new(status);
    match status {
        ConfigurationStatus::Configured => cell.fg(Color::Green),
        ConfigurationStatus::Error => cell.fg(Color::Red).add_attribute(Attribute::Bold),
        ConfigurationStatus::PreConfigured => cell.fg(Color::Yellow),
        ConfigurationStatus::Missing | ConfigurationStatus::Configuring => cell,
    }
}

impl TableFormatter {
    /// Components reported by the Edge
    pub fn format_snapshot(snapshot: &ConfigSnapshot) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(header(&["Component", "Factory", "Alias"]));

        for (id, component) in &snapshot.components {
            table.add_row(vec![
                Cell::new(id),
                Cell::new(&component.factory_id),
                Cell::new(&component.alias),
            ]);
        }

        format!("{table}\n{} component(s)\n", snapshot.len())
    }

    /// Planned components with their current status
    pub fn format_objects(objects: &[ConfigurationObject]) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(header(&["#", "Component", "Factory", "Mode", "Created by", "Status"]));

        for (idx, object) in objects.iter().enumerate() {
            table.add_row(vec![
                Cell::new(idx + 1),
                Cell::new(&object.component_id),
                Cell::new(&object.factory_id),
                Cell::new(object.mode),
                Cell::new(object.base_mode),
                status_cell(object.status),
            ]);
        }

        table.to_string()
    }

    pub fn format_report(report: &ConfigurationReport) -> String {
        let mut output = format!(
            "Provisioning finished in {}s: {} removed, {} created, {} updated, {} remove-only, {} left to app manager, {} app(s) installed\n",
            report.duration().num_seconds(),
            report.deleted,
            report.created,
            report.updated,
            report.removed_only,
            report.skipped_app_manager,
            report.app_steps
        );
        output.push_str(&Self::format_scheduler(&report.scheduler));
        output
    }

    pub fn format_scheduler(outcome: &SchedulerOutcome) -> String {
        match outcome {
            SchedulerOutcome::Created { controller_ids } => {
                format!("Scheduler created: [{}]\n", controller_ids.join(", "))
            }
            SchedulerOutcome::Updated {
                controller_ids,
                added,
            } if added.is_empty() => format!(
                "Scheduler already runs every required controller: [{}]\n",
                controller_ids.join(", ")
            ),
            SchedulerOutcome::Updated {
                controller_ids,
                added,
            } => format!(
                "Scheduler updated, added [{}]: [{}]\n",
                added.join(", "),
                controller_ids.join(", ")
            ),
            SchedulerOutcome::NothingRequired => {
                "Scheduler unchanged (no controllers required)\n".to_owned()
            }
        }
    }
}
