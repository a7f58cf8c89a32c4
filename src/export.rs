use std::io;

use anyhow::Context;
use clap::ValueEnum;
use serde::Serialize;

use crate::client::Resource;
use crate::models::{DashboardData, HomeData};

/// Tabular data that can be written out as CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Table {
    Pipelines,
    Metrics,
    Models,
    Issues,
    News,
    Trends,
    Checklist,
    Suggestions,
}

impl Table {
    pub fn resource(self) -> Resource {
        match self {
            Table::Pipelines => Resource::PipelineStatus,
            Table::Metrics => Resource::QualityMetrics,
            Table::Models => Resource::ModelPerformance,
            Table::Issues => Resource::QualityIssues,
            Table::News => Resource::NewsFeed,
            Table::Trends => Resource::Trends,
            Table::Checklist => Resource::Goals,
            Table::Suggestions => Resource::AiFeedback,
        }
    }

    pub fn is_dashboard(self) -> bool {
        matches!(
            self,
            Table::Pipelines | Table::Metrics | Table::Models | Table::Issues
        )
    }
}

fn write_rows<W, T>(writer: W, rows: &[T]) -> anyhow::Result<usize>
where
    W: io::Write,
    T: Serialize,
{
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(row).context("failed to write CSV row")?;
    }
    csv.flush()?;
    Ok(rows.len())
}

/// Writes a dashboard table. Returns the number of rows written.
pub fn export_dashboard<W: io::Write>(
    table: Table,
    data: &DashboardData,
    writer: W,
) -> anyhow::Result<usize> {
    match table {
        Table::Pipelines => write_rows(writer, &data.pipelines),
        Table::Metrics => write_rows(writer, &data.metrics),
        Table::Models => write_rows(writer, &data.models),
        Table::Issues => write_rows(writer, &data.issues),
        other => anyhow::bail!("{other:?} is not part of the pipeline dashboard"),
    }
}

/// Writes a home table. Returns the number of rows written.
pub fn export_home<W: io::Write>(table: Table, data: &HomeData, writer: W) -> anyhow::Result<usize> {
    match table {
        Table::News => write_rows(writer, &data.news),
        Table::Trends => write_rows(writer, &data.trends),
        Table::Checklist => write_rows(writer, &data.goals.checklist),
        Table::Suggestions => write_rows(writer, &data.suggestions),
        other => anyhow::bail!("{other:?} is not part of the marketing home view"),
    }
}
