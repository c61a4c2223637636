use super::{
    action::Action,
    codec::{TaxiState, FUEL_CAPACITY},
    grid::{Color, LANDMARKS, MAP},
    stations::StationConfig,
};

/// Draw the map as text
///
/// Landmarks keep their letter, the landmark of a waiting passenger is lowercased, fuel stations
/// off the landmarks show as `F` and the taxi as `T` (`@` while carrying the passenger).
pub fn render(state: &TaxiState, stations: &StationConfig, last_action: Option<Action>) -> String {
    let mut rows = MAP.map(|line| line.chars().collect::<Vec<_>>());
    let cell = |pos: (usize, usize)| (pos.0 + 1, 2 * pos.1 + 1);

    for &pos in stations.cells() {
        if !LANDMARKS.contains(&pos) {
            let (r, c) = cell(pos);
            rows[r][c] = 'F';
        }
    }

    if !state.carrying() {
        let (r, c) = cell(LANDMARKS[state.passenger]);
        rows[r][c] = rows[r][c].to_ascii_lowercase();
    }

    let (r, c) = cell(state.taxi());
    rows[r][c] = if state.carrying() { '@' } else { 'T' };

    let mut out = rows
        .iter()
        .map(|row| row.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n");

    let color = |i: usize| Color::from_repr(i).map(|c| c.to_string()).unwrap_or_default();
    let passenger = if state.carrying() {
        String::from("in taxi")
    } else {
        color(state.passenger)
    };
    let on_station = if stations.contains(state.taxi()) { " (at station)" } else { "" };

    out.push_str(&format!(
        "\nPassenger: {}  Destination: {}\nFuel: {}/{}{}",
        passenger,
        color(state.destination),
        state.fuel,
        FUEL_CAPACITY,
        on_station
    ));
    if let Some(action) = last_action {
        out.push_str(&format!("\n  ({action})"));
    }
    if !state.carrying() && state.passenger == state.destination {
        out.push_str("\n  Delivered");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gym::fuel_taxi::{codec::IN_TAXI, stations::enumerate_configurations};

    #[test]
    fn render_waiting_passenger() {
        let configs = enumerate_configurations(&[(2, 2)]);
        let state = TaxiState {
            row: 1,
            col: 1,
            passenger: 1,
            destination: 2,
            fuel: 7,
            station: 0,
        };
        let text = render(&state, &configs[0], Some(Action::West));
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines[1], "|R: | : :g|", "Passenger landmark lowercased, station at R hidden");
        assert_eq!(lines[2], "| :T| : : |", "Taxi drawn");
        assert_eq!(lines[3], "| : :F: : |", "Station drawn");
        assert_eq!(lines[7], "Passenger: Green  Destination: Yellow", "Passenger line");
        assert_eq!(lines[8], "Fuel: 7/10", "Fuel line");
        assert_eq!(lines[9], "  (West)", "Last action");
    }

    #[test]
    fn render_carrying() {
        let configs = enumerate_configurations(&[(2, 2)]);
        let state = TaxiState {
            row: 2,
            col: 2,
            passenger: IN_TAXI,
            destination: 3,
            fuel: 2,
            station: 0,
        };
        let text = render(&state, &configs[0], None);
        assert!(text.contains("| : :@: : |"), "Carrying taxi drawn over the station");
        assert!(text.contains("Passenger: in taxi  Destination: Blue"), "Passenger line");
        assert!(text.ends_with("Fuel: 2/10 (at station)"), "No action line before the first step");
    }

    #[test]
    fn render_delivered() {
        let configs = enumerate_configurations(&[(2, 2)]);
        let state = TaxiState {
            row: 4,
            col: 3,
            passenger: 3,
            destination: 3,
            fuel: 5,
            station: 0,
        };
        let text = render(&state, &configs[0], Some(Action::Dropoff));
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[5], "|Y| : |T: |", "Taxi drawn over the destination");
        assert_eq!(lines[7], "Passenger: Blue  Destination: Blue", "Passenger line");
        assert_eq!(&lines[9..], ["  (Dropoff)", "  Delivered"], "Action and delivery lines");
    }
}
