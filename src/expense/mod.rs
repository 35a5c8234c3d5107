//! Expenses record who paid how much towards an event.

mod db;
mod domain;
mod endpoints;

pub use db::{
    create_expense, create_expense_table, delete_expense, get_expense, get_expenses,
    update_expense,
};
pub use domain::{Expense, ExpenseForm, ExpenseId, NewExpense};
pub use endpoints::{
    create_expense_endpoint, delete_expense_endpoint, get_expense_endpoint,
    get_expenses_endpoint, update_expense_endpoint,
};
