//! Rendering of command results as tables or JSON.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use vitrine_core::{RecommendationResult, RecommenderStats};

use crate::OutputFormat;

pub struct Printer {
    format: OutputFormat,
}

impl Printer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    fn json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub fn recommendations(&self, result: &RecommendationResult) -> anyhow::Result<()> {
        if self.format == OutputFormat::Json {
            return Self::json(result);
        }

        let Some(resolved) = &result.resolved_name else {
            if let Some(message) = &result.message {
                println!("{}", message.yellow());
            }
            if !result.suggestions.is_empty() {
                println!("\n{}", "Did you mean:".bold());
                for name in &result.suggestions {
                    println!("  - {}", name.green());
                }
            }
            return Ok(());
        };

        println!("\n{} {}\n", "Similar to".bold(), resolved.green());
        if result.items.is_empty() {
            println!("No other products in the catalog.");
            return Ok(());
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                "#",
                "Name",
                "Brand",
                "Rating",
                "Reviews",
                "Similarity",
                "Popularity",
                "Score",
            ]);
        for (rank, item) in result.items.iter().enumerate() {
            table.add_row(vec![
                Cell::new(rank + 1),
                Cell::new(&item.name),
                Cell::new(&item.brand),
                Cell::new(format!("{:.1}", item.rating)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.0}", item.review_count)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.3}", item.similarity)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.3}", item.popularity)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.3}", item.score)).set_alignment(CellAlignment::Right),
            ]);
        }
        println!("{table}");
        Ok(())
    }

    pub fn names(&self, query: &str, names: &[String]) -> anyhow::Result<()> {
        if self.format == OutputFormat::Json {
            return Self::json(names);
        }
        if names.is_empty() {
            println!("No product names close to '{}'.", query.yellow());
            return Ok(());
        }
        for name in names {
            println!("{name}");
        }
        Ok(())
    }

    pub fn stats(&self, stats: &RecommenderStats) -> anyhow::Result<()> {
        if self.format == OutputFormat::Json {
            return Self::json(stats);
        }
        println!("\n{}", "Catalog Statistics".bold().underline());
        println!("  {} {}", "Products:".cyan(), stats.products);
        println!("  {} {}", "Distinct Names:".cyan(), stats.distinct_names);
        println!("  {} {}", "Vocabulary:".cyan(), stats.vocabulary_size);
        println!("  {} {}", "Non-zero Entries:".cyan(), stats.non_zero_entries);
        println!();
        Ok(())
    }
}
