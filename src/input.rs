// src/input.rs
//
// Eingabe von Ladungen: interaktiv, per Kommandozeile oder zufällig.
use crate::math::{types::*, utils::random::random_point_in_rect};
use crate::physics::electrostatics::{Charge, ChargeSet, ChargeSetBuilder};
use bevy::log::{debug, info};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::io::{BufRead, Write};
use std::str::FromStr;
use thiserror::Error;

/// Maximaler Betrag zufällig erzeugter Ladungen in Coulomb
pub const RANDOM_CHARGE_LIMIT: f64 = 1e-9;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("I/O error while reading charges: {0}")]
    Io(#[from] std::io::Error),

    #[error("No charges were entered")]
    NoCharges,

    #[error("Invalid charge '{input}': {reason}")]
    Parse { input: String, reason: String },
}

/// Parst eine Ladung im Format `q,x,y` (Coulomb, Meter).
impl FromStr for Charge {
    type Err = InputError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let parse_error = |reason: String| InputError::Parse {
            input: input.to_string(),
            reason,
        };

        let fields: Vec<&str> = input.split(',').map(str::trim).collect();
        let &[q, x, y] = fields.as_slice() else {
            return Err(parse_error(format!(
                "expected 3 comma-separated values, got {}",
                fields.len()
            )));
        };

        let number = |name: &str, text: &str| -> Result<f64, InputError> {
            match text.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(value),
                Ok(value) => Err(parse_error(format!("{name} must be finite, got {value}"))),
                Err(e) => Err(parse_error(format!("{name}: {e}"))),
            }
        };

        Ok(Charge::new(
            number("charge", q)?,
            Point2D::new(number("x", x)?, number("y", y)?),
        ))
    }
}

/// Ergebnis einer einzelnen Eingabeaufforderung.
enum Answer {
    Value(f64),
    Invalid,
    Eof,
}

fn ask_number<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    prompt: &str,
) -> Result<Answer, InputError> {
    write!(writer, "{prompt}")?;
    writer.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(Answer::Eof);
    }
    Ok(match line.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Answer::Value(value),
        _ => Answer::Invalid,
    })
}

fn wants_another(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "si" | "sì"
    )
}

/// Interaktive Eingabe: fragt Ladung, X und Y ab, bis der Nutzer verneint.
///
/// Ungültige Zahlen werden gemeldet und die aktuelle Ladung neu abgefragt.
/// EOF vor der ersten vollständigen Ladung ergibt [`InputError::NoCharges`],
/// danach beendet EOF die Eingabe.
pub fn prompt_charges<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> Result<ChargeSet, InputError> {
    let mut builder = ChargeSetBuilder::new();

    'charges: loop {
        let label = ChargeSet::label(builder.len());
        let prompts = [
            format!("Enter the charge (in Coulomb) for {label}: "),
            format!("Enter the X coordinate (in meters) for {label}: "),
            format!("Enter the Y coordinate (in meters) for {label}: "),
        ];

        let mut values = [0.0; 3];
        for (value, prompt) in values.iter_mut().zip(&prompts) {
            match ask_number(reader, writer, prompt)? {
                Answer::Value(v) => *value = v,
                Answer::Invalid => {
                    writeln!(writer, "Invalid input. Please enter a valid number.")?;
                    continue 'charges;
                }
                Answer::Eof => break 'charges,
            }
        }

        let [q, x, y] = values;
        builder.push(Charge::new(q, Point2D::new(x, y)));
        debug!("Added {label} = {q} C at ({x}, {y})");

        write!(writer, "Add another charge? (yes/no): ")?;
        writer.flush()?;
        let mut answer = String::new();
        if reader.read_line(&mut answer)? == 0 || !wants_another(&answer) {
            break;
        }
    }

    if builder.is_empty() {
        return Err(InputError::NoCharges);
    }
    info!("Entered {} charges", builder.len());
    Ok(builder.build())
}

/// Erzeugt `count` zufällige Ladungen (Betrag in ±1 nC) innerhalb von `bounds`.
pub fn random_charges(count: usize, bounds: &Bounds2D, seed: Option<u64>) -> ChargeSet {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    (0..count)
        .map(|_| {
            let magnitude = rng.random_range(-RANDOM_CHARGE_LIMIT..=RANDOM_CHARGE_LIMIT);
            Charge::new(magnitude, random_point_in_rect(bounds.min, bounds.max, &mut rng))
        })
        .collect()
}
