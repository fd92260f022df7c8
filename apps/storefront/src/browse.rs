//! Interactive terminal front end over the listing and creation views.

use domain_products::{CatalogApi, ProductCategory, SortOrder};
use std::io::Write;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::views::{CreationView, FetchTicket, ListingView, Navigation};

pub const HELP: &str = "\
Commands:
  next | prev              change page
  category <label>         most_viewed, most_popular or most_reviewed
  sort <asc|desc>          order by creation time
  max-price [amount]       set or clear the price ceiling
  add                      add a product
  refresh                  reload the current page
  help                     show this help
  quit                     exit";

/// One line typed at the listing prompt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrowseCommand {
    Next,
    Previous,
    Category(ProductCategory),
    Sort(SortOrder),
    MaxPrice(Option<f64>),
    Add,
    Refresh,
    Help,
    Quit,
}

impl FromStr for BrowseCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default().to_ascii_lowercase();
        let argument = words.next();

        match (command.as_str(), argument) {
            ("next" | "n", None) => Ok(Self::Next),
            ("prev" | "p", None) => Ok(Self::Previous),
            ("category" | "c", Some(label)) => ProductCategory::from_str(label)
                .map(Self::Category)
                .map_err(|_| format!("Unknown category '{}'", label)),
            ("sort" | "s", Some(order)) => SortOrder::from_str(order)
                .map(Self::Sort)
                .map_err(|_| format!("Sort must be asc or desc, got '{}'", order)),
            ("max-price" | "m", None) => Ok(Self::MaxPrice(None)),
            ("max-price" | "m", Some(amount)) => amount
                .parse::<f64>()
                .ok()
                .filter(|a| a.is_finite())
                .map(|a| Self::MaxPrice(Some(a)))
                .ok_or_else(|| format!("Max price must be a number, got '{}'", amount)),
            ("add" | "a", None) => Ok(Self::Add),
            ("refresh" | "r", None) => Ok(Self::Refresh),
            ("help" | "h" | "?", None) => Ok(Self::Help),
            ("quit" | "q" | "exit", None) => Ok(Self::Quit),
            _ => Err(format!("Unrecognized command '{}', type help", line.trim())),
        }
    }
}

/// Run the listing screen until `quit` or end of input
pub async fn run<A, R, W>(api: &A, input: R, out: &mut W) -> eyre::Result<()>
where
    A: CatalogApi + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut view = ListingView::new();
    view.refresh(api).await;

    loop {
        writeln!(out, "\n{}", view)?;
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<BrowseCommand>() {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{}", message)?;
                continue;
            }
        };

        let ticket: Option<FetchTicket> = match command {
            BrowseCommand::Next => view.next_page(),
            BrowseCommand::Previous => view.previous_page(),
            BrowseCommand::Category(category) => view.set_category(category),
            BrowseCommand::Sort(sort) => view.set_sort(sort),
            BrowseCommand::MaxPrice(max_price) => view.set_max_price(max_price),
            BrowseCommand::Refresh => Some(view.begin_fetch()),
            BrowseCommand::Help => {
                writeln!(out, "{}", HELP)?;
                None
            }
            BrowseCommand::Add => {
                if add_product(api, &mut lines, out).await? == Some(Navigation::Listing) {
                    Some(view.begin_fetch())
                } else {
                    None
                }
            }
            BrowseCommand::Quit => break,
        };

        if let Some(ticket) = ticket {
            let outcome = ticket.send(api).await;
            view.apply(outcome);
        }
    }

    Ok(())
}

/// Creation screen: fill the draft, then submit (retrying on failure) or cancel.
///
/// Returns `None` when input ends before the form is done.
async fn add_product<A, R, W>(
    api: &A,
    lines: &mut Lines<R>,
    out: &mut W,
) -> eyre::Result<Option<Navigation>>
where
    A: CatalogApi + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut form = CreationView::new();

    let Some(name) = prompt(lines, out, "Name: ").await? else {
        return Ok(None);
    };
    form.set_name(name);

    let Some(price) = prompt(lines, out, "Price: ").await? else {
        return Ok(None);
    };
    form.set_price(price);

    let default_category = form.draft().category;
    let label = format!("Category [{}]: ", default_category);
    let Some(category) = prompt(lines, out, &label).await? else {
        return Ok(None);
    };
    if !category.is_empty() {
        match ProductCategory::from_str(&category) {
            Ok(category) => form.set_category(category),
            Err(_) => writeln!(out, "Unknown category, using {}", default_category)?,
        }
    }

    loop {
        let Some(answer) = prompt(lines, out, "Submit? [Y/n] ").await? else {
            return Ok(None);
        };

        if answer.eq_ignore_ascii_case("n") {
            return Ok(form.cancel());
        }

        if let Some(navigation) = form.submit(api).await {
            writeln!(out, "Product added.")?;
            return Ok(Some(navigation));
        }
        if let Some(error) = form.error() {
            writeln!(out, "{}", error)?;
        }
        if !form.draft().has_valid_price() {
            let Some(price) = prompt(lines, out, "Price: ").await? else {
                return Ok(None);
            };
            form.set_price(price);
        }
    }
}

async fn prompt<R, W>(lines: &mut Lines<R>, out: &mut W, label: &str) -> eyre::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{}", label)?;
    out.flush()?;
    Ok(lines.next_line().await?.map(|line| line.trim().to_string()))
}
