use anyhow::{anyhow, bail, Context, Result};

use fittrack::models::{Exercise, RepTarget};

/// Parse `NAME:CATEGORY:SETSxREPS`. Reps are a count ("12") or a
/// duration ("45s", "1 min").
pub fn parse_exercise(spec: &str) -> Result<Exercise> {
    let parts: Vec<&str> = spec.split(':').map(str::trim).collect();
    let [name, category, volume] = parts.as_slice() else {
        bail!("expected NAME:CATEGORY:SETSxREPS, got {:?}", spec);
    };

    if name.is_empty() {
        bail!("exercise name must not be empty in {:?}", spec);
    }

    let (sets, reps) = volume
        .split_once(|c| c == 'x' || c == 'X')
        .ok_or_else(|| anyhow!("expected SETSxREPS, got {:?}", volume))?;

    let sets: u32 = sets
        .trim()
        .parse()
        .with_context(|| format!("invalid set count in {:?}", spec))?;
    if sets == 0 {
        bail!("set count must be at least 1 in {:?}", spec);
    }

    let reps = reps.trim();
    let reps = match reps.parse::<u32>() {
        Ok(count) => RepTarget::Count(count),
        Err(_) if !reps.is_empty() => RepTarget::Duration(reps.to_string()),
        Err(_) => bail!("missing reps in {:?}", spec),
    };

    Ok(Exercise::new(name, category, sets, reps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_counted_reps() {
        let exercise = parse_exercise("Bench press:Chest:4x8").unwrap();
        assert_eq!(exercise.name, "Bench press");
        assert_eq!(exercise.category, "Chest");
        assert_eq!(exercise.sets, 4);
        assert_eq!(exercise.reps, RepTarget::Count(8));
    }

    #[test]
    fn test_timed_reps() {
        let exercise = parse_exercise(" Plank : Core : 3 X 45s ").unwrap();
        assert_eq!(exercise.reps, RepTarget::Duration("45s".to_string()));
    }

    #[test]
    fn test_malformed_specs_are_rejected() {
        assert!(parse_exercise("Plank").is_err());
        assert!(parse_exercise("Plank:Core:3").is_err());
        assert!(parse_exercise("Plank:Core:0x30s").is_err());
        assert!(parse_exercise(":Core:3x10").is_err());
        assert!(parse_exercise("Plank:Core:3x").is_err());
    }
}
