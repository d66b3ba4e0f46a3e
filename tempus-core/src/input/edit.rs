//! Edit session state machine
//!
//! Walks a cursor over the six editable BCD digits in display order.
//! At each position Btn1 increments the digit modulo its bound and Btn2
//! confirms and advances; confirming the last digit commits the session.

use crate::registers::ClockFields;
use crate::state::events::ButtonEvent;

/// Cursor position over the editable digits
///
/// Ordered hour tens through second digit. The display columns skip the
/// colon separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditPosition {
    HourTens,
    HourDigit,
    MinuteTens,
    MinuteDigit,
    SecondTens,
    SecondDigit,
}

impl EditPosition {
    /// Where every session starts
    pub const FIRST: Self = EditPosition::HourTens;

    /// Next position in edit order, or `None` after the last digit
    pub fn next(self) -> Option<Self> {
        match self {
            EditPosition::HourTens => Some(EditPosition::HourDigit),
            EditPosition::HourDigit => Some(EditPosition::MinuteTens),
            EditPosition::MinuteTens => Some(EditPosition::MinuteDigit),
            EditPosition::MinuteDigit => Some(EditPosition::SecondTens),
            EditPosition::SecondTens => Some(EditPosition::SecondDigit),
            EditPosition::SecondDigit => None,
        }
    }

    /// Display column of this digit in the HH:MM:SS layout
    pub fn column(self) -> u8 {
        match self {
            EditPosition::HourTens => 0,
            EditPosition::HourDigit => 1,
            EditPosition::MinuteTens => 3,
            EditPosition::MinuteDigit => 4,
            EditPosition::SecondTens => 6,
            EditPosition::SecondDigit => 7,
        }
    }

    /// Largest value this digit may hold
    ///
    /// The hour digit bound depends on the current hour tens: a leading 2
    /// caps the hour at 23.
    pub fn max_value(self, hour_tens: u8) -> u8 {
        match self {
            EditPosition::HourTens => 2,
            EditPosition::HourDigit => {
                if hour_tens == 2 {
                    3
                } else {
                    9
                }
            }
            EditPosition::MinuteTens | EditPosition::SecondTens => 5,
            EditPosition::MinuteDigit | EditPosition::SecondDigit => 9,
        }
    }
}

/// Outcome of feeding one debounced event to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditStep {
    /// Nothing changed this tick
    Pending,
    /// The digit under the cursor changed; redraw it in place
    Updated { column: u8, value: u8 },
    /// The cursor advanced to the next digit
    Moved { column: u8 },
    /// All six digits confirmed; the session is over
    Committed(ClockFields),
}

/// One edit session over the six time digits
///
/// Created from the most recently decoded fields, which it owns exclusively
/// until commit. The running register block is untouched until then.
pub struct EditSession {
    cursor: EditPosition,
    fields: ClockFields,
}

impl EditSession {
    /// Start a session at the hour tens digit
    pub fn new(fields: ClockFields) -> Self {
        Self {
            cursor: EditPosition::FIRST,
            fields,
        }
    }

    /// Current cursor position
    pub fn cursor(&self) -> EditPosition {
        self.cursor
    }

    /// Fields as edited so far
    pub fn fields(&self) -> &ClockFields {
        &self.fields
    }

    /// Feed one debounced button event
    pub fn handle(&mut self, event: ButtonEvent) -> EditStep {
        match event {
            ButtonEvent::Btn1 => {
                let column = self.cursor.column();
                let max = self.cursor.max_value(self.fields.hour_tens);
                let value = self.value_mut();
                *value = (*value + 1) % (max + 1);
                let value = *value;
                EditStep::Updated { column, value }
            }
            ButtonEvent::Btn2 => match self.cursor.next() {
                Some(next) => {
                    self.cursor = next;
                    EditStep::Moved {
                        column: next.column(),
                    }
                }
                None => EditStep::Committed(self.fields),
            },
            _ => EditStep::Pending,
        }
    }

    fn value_mut(&mut self) -> &mut u8 {
        match self.cursor {
            EditPosition::HourTens => &mut self.fields.hour_tens,
            EditPosition::HourDigit => &mut self.fields.hour_digit,
            EditPosition::MinuteTens => &mut self.fields.minute_tens,
            EditPosition::MinuteDigit => &mut self.fields.minute_digit,
            EditPosition::SecondTens => &mut self.fields.second_tens,
            EditPosition::SecondDigit => &mut self.fields.second_digit,
        }
    }
}
