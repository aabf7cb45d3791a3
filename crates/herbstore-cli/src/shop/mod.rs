//! Interactive shop session.
//!
//! Reads one command per line, applies it to the [`Storefront`] and prints
//! the resulting screen. Forms (shipping, card) are read field by field and
//! only reach the storefront once they validate.

mod input;
pub(crate) mod render;

use std::io::Write;

use herbstore_core::{
    AppConfig, CardForm, Catalog, Gallery, PaymentPhase, Screen, ShippingForm, Storefront,
    WhatsAppHandoff,
};
use herbstore_payment::{PaymentError, PaymentOutcome, PaymentSimulator, PaymentTask};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

pub(crate) use input::{parse_action, Action};

enum PaymentEvent {
    Finished(PaymentOutcome),
    PhaseChanged(bool),
    Input(Option<String>),
}

pub(crate) struct Session<R, W> {
    store: Storefront,
    handoff: WhatsAppHandoff,
    simulator: PaymentSimulator,
    currency: String,
    input: Lines<R>,
    out: W,
    /// Gallery position on the product detail screen.
    image_index: usize,
}

impl<R, W> Session<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub(crate) fn new(catalog: Catalog, config: &AppConfig, input: R, out: W) -> Self {
        Self {
            store: Storefront::new(catalog),
            handoff: WhatsAppHandoff::from_config(config),
            simulator: PaymentSimulator::from_config(config),
            currency: config.currency_symbol.clone(),
            input: input.lines(),
            out,
            image_index: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &Storefront {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn output(&self) -> &W {
        &self.out
    }

    /// Runs until `quit` or end of input.
    pub(crate) async fn run(&mut self) -> anyhow::Result<()> {
        self.render_screen()?;
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;
            let Some(line) = self.input.next_line().await? else {
                break;
            };

            let action = match parse_action(&line) {
                Ok(Action::Quit) => break,
                Ok(action) => action,
                Err(message) => {
                    writeln!(self.out, "{message}")?;
                    continue;
                }
            };

            self.apply(action).await?;
            if self.store.take_scroll_reset() {
                self.render_screen()?;
            }
        }
        tracing::debug!(items = self.store.item_count(), "shop session ended");
        Ok(())
    }

    async fn apply(&mut self, action: Action) -> anyhow::Result<()> {
        let catalog = self.store.catalog();
        match action {
            Action::Noop | Action::Quit => {}
            Action::Help => writeln!(self.out, "{}", input::HELP)?,
            Action::Back => self.store.navigate_back(),
            Action::Filter(filter) => {
                if self.store.screen() == Screen::Catalog {
                    self.store.set_category_filter(filter);
                    self.render_screen()?;
                } else {
                    writeln!(self.out, "Filters apply on the catalog screen.")?;
                }
            }
            Action::View(id) => match catalog.get(&id) {
                Some(product) => {
                    self.image_index = 0;
                    self.store.select_product(product);
                }
                None => writeln!(self.out, "No product with id '{id}'.")?,
            },
            Action::Add(id) => {
                let product = match id {
                    Some(id) => catalog.get(&id),
                    None if self.store.screen() == Screen::ProductDetail => {
                        self.store.selected().and_then(|p| catalog.get(&p.id))
                    }
                    None => {
                        writeln!(self.out, "usage: add <id>")?;
                        return Ok(());
                    }
                };
                match product {
                    Some(product) => {
                        self.store.add_to_cart(product);
                        self.render_cart()?;
                    }
                    None => writeln!(self.out, "No such product.")?,
                }
            }
            Action::NextImage => self.browse_images(|g| g.next_image())?,
            Action::PrevImage => self.browse_images(|g| g.prev_image())?,
            Action::Image(index) => self.browse_images(|g| g.select(index))?,
            Action::OpenCart => {
                self.store.open_cart();
                self.render_cart()?;
            }
            Action::CloseCart => self.store.close_cart(),
            Action::Adjust { id, delta } => {
                self.store.update_quantity(&id, delta);
                self.render_cart()?;
            }
            Action::Remove(id) => {
                self.store.remove_item(&id);
                self.render_cart()?;
            }
            Action::Checkout => match self.store.screen() {
                Screen::Checkout => writeln!(self.out, "Already checking out.")?,
                _ => self.store.proceed_to_checkout(),
            },
            Action::WhatsApp => self.order_via_whatsapp()?,
            Action::Ship => self.enter_shipping().await?,
            Action::Pay => self.pay().await?,
        }
        Ok(())
    }

    fn browse_images(&mut self, step: impl FnOnce(&mut Gallery<'_>)) -> anyhow::Result<()> {
        let Some(product) = self.store.selected() else {
            writeln!(self.out, "Open a product first: view <id>")?;
            return Ok(());
        };
        let mut gallery = Gallery::new(product);
        gallery.select(self.image_index);
        step(&mut gallery);
        self.image_index = gallery.index();
        let text = render::detail_screen(product, &gallery, &self.currency);
        write!(self.out, "{text}")?;
        Ok(())
    }

    fn checkout_ready(&mut self) -> anyhow::Result<bool> {
        if self.store.screen() != Screen::Checkout {
            writeln!(self.out, "Go to checkout first.")?;
            return Ok(false);
        }
        if self.store.cart().is_empty() {
            writeln!(self.out, "Your cart is empty.")?;
            return Ok(false);
        }
        Ok(true)
    }

    fn order_via_whatsapp(&mut self) -> anyhow::Result<()> {
        if !self.checkout_ready()? {
            return Ok(());
        }
        let url = self.handoff.order_url(self.store.cart());
        writeln!(self.out, "Open this link to send your order:\n{url}")?;
        let receipt = self.store.place_order();
        write!(self.out, "{}", render::receipt(&receipt, &self.currency))?;
        Ok(())
    }

    async fn enter_shipping(&mut self) -> anyhow::Result<()> {
        if !self.checkout_ready()? {
            return Ok(());
        }

        let mut form = ShippingForm::default();
        let fields: [(&str, &mut String); 8] = [
            ("Full Name", &mut form.full_name),
            ("Mobile Number", &mut form.mobile),
            ("Email ID", &mut form.email),
            ("Full Address", &mut form.address),
            ("City", &mut form.city),
            ("District", &mut form.district),
            ("State", &mut form.state),
            ("Pincode", &mut form.pincode),
        ];
        for (label, slot) in fields {
            match ask(&mut self.input, &mut self.out, label).await? {
                Some(value) => *slot = value,
                None => return Ok(()),
            }
        }

        match form.submit() {
            Ok(details) => {
                tracing::info!(city = %details.city, state = %details.state, "shipping details accepted");
                writeln!(
                    self.out,
                    "Shipping to {}, {}, {} {}",
                    details.full_name, details.city, details.country, details.pincode
                )?;
                self.store.proceed_to_payment();
            }
            Err(e) => writeln!(self.out, "{e}")?,
        }
        Ok(())
    }

    async fn pay(&mut self) -> anyhow::Result<()> {
        if self.store.screen() != Screen::Payment {
            writeln!(self.out, "Enter shipping details at checkout first.")?;
            return Ok(());
        }

        let mut form = CardForm::default();
        let fields: [(&str, &mut String); 4] = [
            ("Card Number", &mut form.number),
            ("Expiry Date (MM/YY)", &mut form.expiry),
            ("CVV", &mut form.cvv),
            ("Card Holder Name", &mut form.holder),
        ];
        for (label, slot) in fields {
            match ask(&mut self.input, &mut self.out, label).await? {
                Some(value) => *slot = value,
                None => return Ok(()),
            }
        }

        match self.simulator.submit(&form, self.store.subtotal()) {
            Ok(task) => self.await_payment(task).await,
            Err(PaymentError::InvalidCard(e)) => {
                writeln!(self.out, "{e}")?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Shows phase changes until the payment completes or the shopper types
    /// `back`, which cancels it. Closed input lets the payment finish.
    async fn await_payment(&mut self, mut task: PaymentTask) -> anyhow::Result<()> {
        let mut phases = task.subscribe();
        let mut phases_open = true;
        let mut input_open = true;
        write!(
            self.out,
            "{}",
            render::payment_screen(PaymentPhase::Processing, task.amount(), &self.currency)
        )?;

        loop {
            let event = tokio::select! {
                biased;
                outcome = task.wait() => PaymentEvent::Finished(outcome),
                changed = phases.changed(), if phases_open => PaymentEvent::PhaseChanged(changed.is_ok()),
                line = self.input.next_line(), if input_open => PaymentEvent::Input(line?),
            };

            match event {
                PaymentEvent::Finished(PaymentOutcome::Completed) => {
                    let receipt = self.store.complete_payment();
                    write!(self.out, "{}", render::receipt(&receipt, &self.currency))?;
                    return Ok(());
                }
                PaymentEvent::Finished(PaymentOutcome::Cancelled) => return Ok(()),
                PaymentEvent::PhaseChanged(true) => {
                    let phase = *phases.borrow_and_update();
                    write!(
                        self.out,
                        "{}",
                        render::payment_screen(phase, task.amount(), &self.currency)
                    )?;
                }
                PaymentEvent::PhaseChanged(false) => phases_open = false,
                PaymentEvent::Input(None) => input_open = false,
                PaymentEvent::Input(Some(line)) => {
                    if line.trim().eq_ignore_ascii_case("back") {
                        task.cancel();
                        task.wait().await;
                        self.store.navigate_back();
                        writeln!(self.out, "Payment cancelled.")?;
                        return Ok(());
                    }
                    writeln!(self.out, "Payment in progress; type 'back' to cancel.")?;
                }
            }
        }
    }

    fn render_cart(&mut self) -> anyhow::Result<()> {
        if self.store.is_cart_open() {
            let text = render::cart_panel(&self.store, &self.currency);
            write!(self.out, "{text}")?;
        }
        Ok(())
    }

    fn render_screen(&mut self) -> anyhow::Result<()> {
        let text = render::screen(&self.store, self.image_index, &self.currency);
        write!(self.out, "{text}")?;
        Ok(())
    }
}

/// Prompts for one form field. `None` means input ended.
async fn ask<R, W>(input: &mut Lines<R>, out: &mut W, label: &str) -> anyhow::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{label}: ")?;
    out.flush()?;
    Ok(input.next_line().await?)
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
