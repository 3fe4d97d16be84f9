use crate::aggregate::{
    OwnerFilter, PairOutcome, Settlement, budget_remaining, day_breakdown, settle,
    total_actual_expenses, total_estimated_cost, total_expenses_by_owner,
};
use crate::models::{OwnerId, Trip};
use crate::money::Converter;
use crate::ui::messages::header;
use crate::utils::colors::{RESET, color_for_balance};
use crate::utils::date::format_date;
use crate::utils::table::{Column, Table};

pub struct SummaryLogic;

impl SummaryLogic {
    pub fn print(trip: &Trip, conv: &Converter) {
        header(format!("{} ({})", trip.name, conv.display));

        // 1️⃣ per-day estimated vs actual
        let mut table = Table::new(vec![
            Column::right("Day"),
            Column::left("Date"),
            Column::right("Estimated"),
            Column::right("Actual"),
        ]);
        for row in day_breakdown(trip) {
            table.add_row(vec![
                row.day_number.to_string(),
                format_date(row.date),
                conv.format(row.estimated),
                conv.format(row.actual),
            ]);
        }
        print!("{}", table.render());

        // 2️⃣ trip totals
        let remaining = budget_remaining(trip);
        println!();
        println!("Budget        : {}", conv.format(trip.total_budget));
        println!("Estimated     : {}", conv.format(total_estimated_cost(trip)));
        println!("Spent         : {}", conv.format(total_actual_expenses(trip)));
        println!(
            "Remaining     : {}{}{}",
            color_for_balance(remaining),
            conv.format(remaining),
            RESET
        );

        // 3️⃣ per owner
        println!();
        for owner in &trip.owners {
            let total = total_expenses_by_owner(trip, &OwnerFilter::Owner(owner.id.clone()));
            println!("  {:<12}: {}", owner.label(), conv.format(total));
        }

        // 4️⃣ settlement (absent without real owners)
        if let Some(settlement) = settle(trip) {
            println!();
            println!("Settlement:");
            Self::print_settlement(trip, &settlement, conv);
        }
    }

    fn name<'a>(trip: &'a Trip, id: &'a OwnerId) -> &'a str {
        trip.owner(id).map(|o| o.label()).unwrap_or(id.as_str())
    }

    fn print_settlement(trip: &Trip, settlement: &Settlement, conv: &Converter) {
        match settlement {
            Settlement::Single(share) => {
                println!(
                    "  {} pays everything: {}",
                    Self::name(trip, &share.owner),
                    conv.format(share.total)
                );
            }
            Settlement::Pair { shares, outcome } => {
                for s in shares {
                    println!(
                        "  {:<12}: fair share {}",
                        Self::name(trip, &s.owner),
                        conv.format(s.total)
                    );
                }
                match outcome {
                    PairOutcome::Settled => println!("  ✅ Settled"),
                    PairOutcome::Transfer { from, to, amount } => println!(
                        "  💸 {} owes {} {}",
                        Self::name(trip, from),
                        Self::name(trip, to),
                        conv.format(*amount)
                    ),
                }
            }
            Settlement::Group {
                mean, deviations, ..
            } => {
                println!("  Mean fair share: {}", conv.format(*mean));
                for (owner, dev) in deviations {
                    let sign = if *dev > 0.0 { "+" } else if *dev < 0.0 { "-" } else { "" };
                    println!(
                        "  {:<12}: {}{}{}{}",
                        Self::name(trip, owner),
                        color_for_balance(*dev),
                        sign,
                        conv.format(dev.abs()),
                        RESET
                    );
                }
            }
        }
    }
}
