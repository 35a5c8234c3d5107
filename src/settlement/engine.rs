//! Computes equal-split balances for an event and the transfers that settle them.
//!
//! All arithmetic happens in whole cents so that the balances sum to exactly
//! zero and the transfer sweep always terminates with every balance settled.

use std::{
    cmp::Reverse,
    collections::{BTreeMap, HashMap, HashSet},
};

use crate::{
    Error,
    settlement::{ExpenseRecord, MAX_AMOUNT, Settlement, Transfer},
};

/// Money in whole cents.
///
/// Wide enough that sums of [MAX_AMOUNT] and their products with the roster
/// size cannot overflow.
type Cents = i128;

/// A participant's running totals during a computation.
#[derive(Debug)]
struct Position<'a> {
    name: &'a str,
    paid: Cents,
    balance: Cents,
}

impl<'a> Position<'a> {
    fn new(name: &'a str) -> Self {
        Self {
            name,
            paid: 0,
            balance: 0,
        }
    }
}

/// Compute each participant's balance against an equal share of the total
/// and an ordered list of transfers that settles every balance.
///
/// The balance of a participant is what they paid minus their share, rounded
/// down to cents. Every roster member's exact balance has the same fraction
/// of a cent, so rounding down leaves every member the same fraction short
/// and the balances short of zero by fewer cents than there are members.
/// Those cents go to roster members one cent each, in roster order, which
/// keeps every balance within a cent of its exact value.
///
/// Transfers are matched greedily: debtors are sorted from the largest debt
/// down, creditors from the largest credit down, and the current debtor pays
/// the current creditor as much as possible before either pointer moves on.
/// Ties keep roster order.
///
/// Payers that are not on the roster do not share the cost: they are added
/// to the balances as creditors for the full amount they paid.
///
/// # Errors
///
/// Returns [Error::InvalidInput] if:
/// - `roster` is empty,
/// - `roster` lists the same name twice,
/// - an amount is negative, NaN, infinite or more than [MAX_AMOUNT].
pub fn compute_settlement(
    roster: &[String],
    records: &[ExpenseRecord],
) -> Result<Settlement, Error> {
    if roster.is_empty() {
        return Err(Error::InvalidInput(
            "the roster must have at least one participant".to_owned(),
        ));
    }

    let mut seen = HashSet::with_capacity(roster.len());
    if let Some(duplicate) = roster.iter().find(|name| !seen.insert(name.as_str())) {
        return Err(Error::InvalidInput(format!(
            "\"{duplicate}\" appears more than once in the roster"
        )));
    }

    // Roster members in roster order, followed by any other payers in order of appearance.
    let mut positions: Vec<Position> = roster.iter().map(|name| Position::new(name)).collect();
    let mut index_by_name: HashMap<&str, usize> = roster
        .iter()
        .enumerate()
        .map(|(index, name)| (name.as_str(), index))
        .collect();

    let mut total: Cents = 0;

    for record in records {
        let amount = to_cents(record.amount)?;
        total += amount;

        let index = *index_by_name
            .entry(record.payer_name.as_str())
            .or_insert_with(|| {
                tracing::warn!(
                    "\"{}\" paid for an expense but is not on the roster",
                    record.payer_name
                );
                positions.push(Position::new(&record.payer_name));
                positions.len() - 1
            });
        positions[index].paid += amount;
    }

    let people = roster.len() as Cents;

    for (index, position) in positions.iter_mut().enumerate() {
        position.balance = if index < roster.len() {
            // Scaled by the number of people to keep the exact balance an integer.
            (position.paid * people - total).div_euclid(people)
        } else {
            position.paid
        };
    }

    let shortfall = -positions
        .iter()
        .map(|position| position.balance)
        .sum::<Cents>();
    distribute_shortfall(&mut positions[..roster.len()], shortfall);

    let settlements = match_transfers(&positions);

    let balances: BTreeMap<String, f64> = positions
        .iter()
        .map(|position| (position.name.to_owned(), from_cents(position.balance)))
        .collect();

    let settlement = Settlement {
        balances,
        settlements,
        total_people: roster.len(),
        total_expense: from_cents(total),
        share_per_person: from_cents(div_round(total, people)),
    };

    tracing::debug!(
        total_people = settlement.total_people,
        total_expense = settlement.total_expense,
        transfer_count = settlement.settlements.len(),
        "Computed settlement"
    );

    Ok(settlement)
}

/// Add one cent to the first `shortfall` roster members so that all balances
/// sum to zero.
///
/// `shortfall` is how far the rounded down balances fall short of zero. It is
/// less than the roster size, so every member gets at most one cent.
fn distribute_shortfall(roster: &mut [Position], shortfall: Cents) {
    let adjustments = usize::try_from(shortfall).unwrap_or(0);

    for position in roster.iter_mut().take(adjustments) {
        position.balance += 1;
    }
}

/// Greedily pair debtors with creditors, largest amounts first.
fn match_transfers(positions: &[Position]) -> Vec<Transfer> {
    let mut debtors: Vec<(&str, Cents)> = positions
        .iter()
        .filter(|position| position.balance < 0)
        .map(|position| (position.name, position.balance))
        .collect();
    let mut creditors: Vec<(&str, Cents)> = positions
        .iter()
        .filter(|position| position.balance > 0)
        .map(|position| (position.name, position.balance))
        .collect();

    debtors.sort_by_key(|&(_, balance)| balance);
    creditors.sort_by_key(|&(_, balance)| Reverse(balance));

    let mut transfers = Vec::new();
    let (mut debtor, mut creditor) = (0, 0);

    while debtor < debtors.len() && creditor < creditors.len() {
        let amount = (-debtors[debtor].1).min(creditors[creditor].1);

        transfers.push(Transfer {
            from: debtors[debtor].0.to_owned(),
            to: creditors[creditor].0.to_owned(),
            amount: from_cents(amount),
        });

        debtors[debtor].1 += amount;
        creditors[creditor].1 -= amount;

        if debtors[debtor].1 == 0 {
            debtor += 1;
        }

        if creditors[creditor].1 == 0 {
            creditor += 1;
        }
    }

    transfers
}

fn to_cents(amount: f64) -> Result<Cents, Error> {
    if !amount.is_finite() {
        return Err(Error::InvalidInput(format!(
            "{amount} is not a valid amount"
        )));
    }

    if amount < 0.0 {
        return Err(Error::InvalidInput(
            "amounts must be zero or more".to_owned(),
        ));
    }

    if amount > MAX_AMOUNT {
        return Err(Error::InvalidInput(format!(
            "amounts must be at most {MAX_AMOUNT}"
        )));
    }

    Ok((amount * 100.0).round() as Cents)
}

fn from_cents(cents: Cents) -> f64 {
    cents as f64 / 100.0
}

/// Divide and round half away from zero. `denominator` must be positive.
fn div_round(numerator: Cents, denominator: Cents) -> Cents {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;

    if 2 * remainder.abs() >= denominator {
        quotient + numerator.signum()
    } else {
        quotient
    }
}
