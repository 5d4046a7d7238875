use anyhow::{Result, bail};
use rusqlite::Connection;
use serde_json::json;

use crate::cli::args::ContactsAction;
use crate::cli::context::RunContext;
use crate::db::contacts::{self, NewContact};
use crate::output::format::{OutputMode, empty_message};
use crate::output::json::to_json;

pub fn run(conn: &mut Connection, action: &ContactsAction, ctx: &RunContext) -> Result<()> {
    match action {
        ContactsAction::List { favorites } => list(conn, *favorites, ctx),
        ContactsAction::Show { id } => show(conn, id, ctx),
        ContactsAction::Add {
            first,
            last,
            phone,
            email,
        } => add(
            conn,
            &NewContact {
                first_name: first.clone(),
                last_name: last.clone(),
                phone: phone.clone(),
                email: email.clone(),
            },
            ctx,
        ),
        ContactsAction::Edit {
            id,
            first,
            last,
            phone,
        } => {
            if !contacts::update_contact(conn, id, first, last, phone)? {
                bail!("No contact found with id \"{}\"", id);
            }
            report(ctx, id, "updated");
            Ok(())
        }
        ContactsAction::Delete { id } => {
            if !contacts::delete_contact(conn, id)? {
                bail!("No contact found with id \"{}\"", id);
            }
            report(ctx, id, "deleted");
            Ok(())
        }
        ContactsAction::Favorite { id, off } => favorite(conn, id, !off, ctx),
    }
}

fn list(conn: &Connection, favorites: bool, ctx: &RunContext) -> Result<()> {
    let index = super::load_directory(conn)?;
    let entries: Vec<_> = if favorites {
        index.favorites().collect()
    } else {
        index.entries().iter().collect()
    };

    match ctx.output_mode {
        OutputMode::Json => {
            println!("{}", crate::output::json::format_contacts(&entries));
        }
        OutputMode::Tty => {
            if entries.is_empty() {
                let what = if favorites { "favorites" } else { "contacts" };
                println!("{}", empty_message(None, what));
                return Ok(());
            }
            for entry in entries {
                println!("{}", crate::output::table::format_contact_row(entry, &ctx.settings));
            }
        }
    }

    Ok(())
}

fn show(conn: &Connection, id: &str, ctx: &RunContext) -> Result<()> {
    let Some(details) = contacts::contact_details(conn, id)? else {
        bail!("No contact found with id \"{}\"", id);
    };

    match ctx.output_mode {
        OutputMode::Json => {
            println!("{}", crate::output::json::format_contact_detail(&details));
        }
        OutputMode::Tty => {
            println!("{}", crate::output::table::format_contact_detail(&details, &ctx.settings));
        }
    }

    Ok(())
}

fn add(conn: &mut Connection, contact: &NewContact, ctx: &RunContext) -> Result<()> {
    if contacts::display_name(&contact.first_name, &contact.last_name).is_empty() {
        bail!("A contact needs a name");
    }
    let id = contacts::add_contact(conn, contact)?;
    report(ctx, &id, "added");
    Ok(())
}

/// Flip the flag in the store and print the entry as it now reads.
fn favorite(conn: &Connection, id: &str, is_favorite: bool, ctx: &RunContext) -> Result<()> {
    let index = super::load_directory(conn)?;
    let Some(entry) = index.get(id) else {
        bail!("No contact found with id \"{}\"", id);
    };
    if !contacts::set_favorite(conn, id, is_favorite)? {
        bail!("No contact found with id \"{}\"", id);
    }

    let updated = entry.with_favorite(is_favorite);
    let status = if is_favorite { "favorited" } else { "unfavorited" };
    match ctx.output_mode {
        OutputMode::Json => {
            println!("{}", to_json(&json!({ "id": id, "status": status, "contact": updated })));
        }
        OutputMode::Tty => {
            println!("Contact {} {}.", id, status);
            println!("{}", crate::output::table::format_contact_row(&updated, &ctx.settings));
        }
    }
    Ok(())
}

fn report(ctx: &RunContext, id: &str, what: &str) {
    match ctx.output_mode {
        OutputMode::Json => println!("{}", to_json(&json!({ "id": id, "status": what }))),
        OutputMode::Tty => println!("Contact {} {}.", id, what),
    }
}
