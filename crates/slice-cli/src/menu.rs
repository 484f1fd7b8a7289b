//! # Counter Menu
//!
//! Numbered console menus driving one `OrderSession` per order:
//! choose a base, add toppings, pay, then show the remaining stock and
//! start over. End of input leaves the counter.

use slice_core::{AddOnKind, BaseKind, OrderSession, Shop};
use std::io::{BufRead, Write};

/// Whether to keep taking orders
enum Flow {
    Continue,
    Exit,
}

/// Console front end for a shop
pub struct Counter<R, W> {
    shop: Shop,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Counter<R, W> {
    pub fn new(shop: Shop, input: R, output: W) -> Self {
        Self {
            shop,
            input,
            output,
        }
    }

    /// Take orders until the customer exits or input ends
    pub fn run(mut self) -> anyhow::Result<()> {
        writeln!(self.output, "Welcome to Slice Shop!")?;

        loop {
            let flow = self.take_order()?;
            if let Flow::Exit = flow {
                break;
            }
            self.print_inventory()?;
        }

        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }

    fn prompt(&mut self) -> anyhow::Result<Option<String>> {
        write!(self.output, "Enter the number of your choice: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn take_order(&mut self) -> anyhow::Result<Flow> {
        let mut session = self.shop.new_session();

        if let Flow::Exit = self.choose_base(&mut session)? {
            session.cancel()?;
            return Ok(Flow::Exit);
        }
        if let Flow::Exit = self.choose_add_ons(&mut session)? {
            session.cancel()?;
            return Ok(Flow::Exit);
        }

        let total = session.finish()?;
        writeln!(self.output, "\nYour order:")?;
        if let Some(product) = session.product() {
            writeln!(self.output, "Description: {}", product.description())?;
        }
        writeln!(self.output, "Total cost: {}", total)?;

        self.choose_payment(&mut session)
    }

    fn choose_base(&mut self, session: &mut OrderSession) -> anyhow::Result<Flow> {
        loop {
            writeln!(self.output, "\nChoose your base pizza:")?;
            for (idx, kind) in BaseKind::ALL.iter().enumerate() {
                if let Some(entry) = self.shop.catalog().base(*kind) {
                    writeln!(self.output, "{}. {} ({})", idx + 1, entry.name, entry.price)?;
                }
            }
            writeln!(self.output, "0 => to exit")?;

            let choice = match self.prompt()? {
                Some(choice) if choice != "0" => choice,
                _ => return Ok(Flow::Exit),
            };

            let selected = choice
                .parse::<BaseKind>()
                .and_then(|kind| session.select_base(kind).map(|_| ()));
            match selected {
                Ok(()) => return Ok(Flow::Continue),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    fn choose_add_ons(&mut self, session: &mut OrderSession) -> anyhow::Result<Flow> {
        let finish = (AddOnKind::ALL.len() + 1).to_string();

        loop {
            writeln!(self.output, "\nAvailable toppings:")?;
            for (idx, kind) in AddOnKind::ALL.iter().enumerate() {
                if let Some(entry) = self.shop.catalog().add_on(*kind) {
                    writeln!(self.output, "{}. {} (+{})", idx + 1, entry.name, entry.price)?;
                }
            }
            writeln!(self.output, "{}. Finish order", finish)?;

            let Some(choice) = self.prompt()? else {
                return Ok(Flow::Exit);
            };
            if choice == finish {
                return Ok(Flow::Continue);
            }

            let applied = choice
                .parse::<AddOnKind>()
                .and_then(|kind| session.add_add_on(kind).map(|_| ()));
            if let Err(e) = applied {
                writeln!(self.output, "Topping unavailable: {}", e)?;
            }
        }
    }

    fn choose_payment(&mut self, session: &mut OrderSession) -> anyhow::Result<Flow> {
        loop {
            writeln!(self.output, "\nChoose payment method:")?;
            for (idx, (_, name)) in self.shop.payments().channels().iter().enumerate() {
                writeln!(self.output, "{}. {}", idx + 1, name)?;
            }

            let Some(choice) = self.prompt()? else {
                return Ok(Flow::Exit);
            };

            match session.select_payment(&choice) {
                Ok(order) => {
                    writeln!(
                        self.output,
                        "Paid {} using {}.",
                        order.receipt.amount, order.receipt.channel
                    )?;
                    writeln!(self.output, "Payment successful! Receipt {}", order.receipt.id)?;
                    return Ok(Flow::Continue);
                }
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    fn print_inventory(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "\nRemaining Inventory:")?;
        for (item, count) in self.shop.inventory_snapshot() {
            writeln!(self.output, "  {}: {}", item, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slice_core::{Catalog, Price};
    use std::io::Cursor;

    fn run_script(shop: Shop, script: &str) -> String {
        let mut output = Vec::new();
        Counter::new(shop, Cursor::new(script.as_bytes()), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_single_order() {
        let shop = Shop::default();
        let output = run_script(shop.clone(), "1\n1\n2\n4\n1\n0\n");

        assert!(output.contains("1. Margherita ($5.00)"));
        assert!(output.contains("Description: Margherita, Cheese, Olives"));
        assert!(output.contains("Total cost: $6.50"));
        assert!(output.contains("Paid $6.50 using PayPal."));
        assert!(output.contains("  Cheese: 14"));
        assert!(output.ends_with("Goodbye!\n"));
        assert_eq!(shop.inventory().remaining("Margherita"), 9);
    }

    #[test]
    fn test_invalid_selections_are_reported() {
        let output = run_script(Shop::default(), "9\n2\nx\n4\n7\n2\n0\n");

        assert!(output.contains("Unknown product kind: 9"));
        assert!(output.contains("Topping unavailable: Unknown add-on kind: x"));
        assert!(output.contains("Invalid payment method: 7"));
        assert!(output.contains("Paid $6.00 using Credit Card."));
    }

    #[test]
    fn test_out_of_stock_topping() {
        let catalog = Catalog::new()
            .with_base(BaseKind::Pepperoni, "Pepperoni", Price::new(6.0), 2)
            .with_add_on(AddOnKind::Olives, "Olives", Price::new(0.5), 1);
        let output = run_script(Shop::new(catalog).unwrap(), "2\n2\n2\n4\n1\n");

        assert!(output.contains("Topping unavailable: Out of stock: Olives"));
        assert!(output.contains("Description: Pepperoni, Olives"));
        assert!(output.contains("  Olives: 0"));
    }

    #[test]
    fn test_eof_exits_cleanly() {
        let shop = Shop::default();
        let output = run_script(shop.clone(), "1\n1\n");

        assert!(output.ends_with("Goodbye!\n"));
        assert!(!output.contains("Your order:"));
        assert_eq!(shop.inventory().remaining("Margherita"), 9);
        assert_eq!(shop.inventory().remaining("Cheese"), 14);
    }
}
