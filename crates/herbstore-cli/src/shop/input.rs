//! Command parsing for the interactive shop.

use herbstore_core::CategoryFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    Noop,
    Help,
    Quit,
    Back,
    Filter(CategoryFilter),
    View(String),
    /// `None` adds the product on the detail screen.
    Add(Option<String>),
    NextImage,
    PrevImage,
    /// Zero-based thumbnail index.
    Image(usize),
    OpenCart,
    CloseCart,
    Adjust { id: String, delta: i64 },
    Remove(String),
    Checkout,
    WhatsApp,
    Ship,
    Pay,
}

pub(crate) const HELP: &str = "\
Commands:
  filter <category>   show All, Tea, Oil, Salve or Supplement
  view <id>           open a product
  add [id]            add to cart (no id: the product being viewed)
  next | prev         browse product images
  image <n>           jump to image n
  cart | close        open or close the cart panel
  inc <id> [n]        increase a cart quantity (default 1)
  dec <id> [n]        decrease a cart quantity (never below 1)
  rm <id>             remove a cart line
  checkout            go to checkout
  whatsapp            send the order via WhatsApp (checkout)
  ship                enter shipping details and continue to payment (checkout)
  pay                 enter card details and pay (payment)
  back                go back
  quit                leave the shop";

fn arg<'a>(parts: &[&'a str], index: usize, usage: &str) -> Result<&'a str, String> {
    parts
        .get(index)
        .copied()
        .ok_or_else(|| format!("usage: {usage}"))
}

fn step(parts: &[&str], usage: &str) -> Result<i64, String> {
    match parts.get(2) {
        None => Ok(1),
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(format!("usage: {usage}")),
        },
    }
}

pub(crate) fn parse_action(line: &str) -> Result<Action, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(command) = parts.first() else {
        return Ok(Action::Noop);
    };

    let action = match command.to_ascii_lowercase().as_str() {
        "help" | "?" => Action::Help,
        "quit" | "exit" => Action::Quit,
        "back" => Action::Back,
        "filter" => Action::Filter(arg(&parts, 1, "filter <category>")?.parse()?),
        "view" => Action::View(arg(&parts, 1, "view <id>")?.to_string()),
        "add" => Action::Add(parts.get(1).map(|s| (*s).to_string())),
        "next" => Action::NextImage,
        "prev" => Action::PrevImage,
        "image" => {
            let n = arg(&parts, 1, "image <n>")?
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| "usage: image <n> (n starts at 1)".to_string())?;
            Action::Image(n - 1)
        }
        "cart" => Action::OpenCart,
        "close" => Action::CloseCart,
        "inc" => Action::Adjust {
            id: arg(&parts, 1, "inc <id> [n]")?.to_string(),
            delta: step(&parts, "inc <id> [n]")?,
        },
        "dec" => Action::Adjust {
            id: arg(&parts, 1, "dec <id> [n]")?.to_string(),
            delta: -step(&parts, "dec <id> [n]")?,
        },
        "rm" | "remove" => Action::Remove(arg(&parts, 1, "rm <id>")?.to_string()),
        "checkout" => Action::Checkout,
        "whatsapp" => Action::WhatsApp,
        "ship" => Action::Ship,
        "pay" => Action::Pay,
        other => return Err(format!("unknown command '{other}'; type 'help'")),
    };
    Ok(action)
}
