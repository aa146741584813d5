#[cfg(test)]
mod tests {
    use crate::commands::PlayerCommand;
    use crate::enums::*;
    use crate::events::SimEvent;
    use crate::records::{parse_fires, parse_stations, RecordError};
    use crate::types::{GeoPoint, SimTime};

    #[test]
    fn test_fire_records_apply_defaults() {
        let json = r#"{
            "fires": [
                { "id": "f1", "lat": 46.55, "lon": 15.64 },
                { "id": "f2", "name": "Warehouse", "lat": 46.56, "lon": 15.65,
                  "severity": 7, "accessibility": "Poor" }
            ]
        }"#;
        let fires = parse_fires(json).unwrap();
        assert_eq!(fires.len(), 2);

        assert_eq!(fires[0].name, "f1", "name should default to id");
        assert_eq!(fires[0].severity, 1);
        assert_eq!(fires[0].accessibility, Accessibility::Good);

        assert_eq!(fires[1].name, "Warehouse");
        assert_eq!(fires[1].severity, 3, "severity should clamp to 3");
        assert_eq!(fires[1].accessibility, Accessibility::Poor);
    }

    #[test]
    fn test_station_records_both_formats() {
        let list = r#"{ "stations": [
            { "id": "s1", "lat": 46.5, "lon": 15.6, "totalTrucks": 7 },
            { "id": "s2", "name": "Center", "lat": 46.6, "lon": 15.7 }
        ] }"#;
        let stations = parse_stations(list).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].total_trucks, 7);
        assert_eq!(stations[1].total_trucks, 5);
        assert_eq!(stations[1].name, "Center");

        let legacy = r#"{ "station": { "id": "old", "lat": 46.5, "lon": 15.6 } }"#;
        let stations = parse_stations(legacy).unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].name, "old");
    }

    #[test]
    fn test_station_records_missing() {
        let err = parse_stations("{}").unwrap_err();
        assert!(matches!(err, RecordError::MissingStation));

        let err = parse_stations("not json").unwrap_err();
        assert!(matches!(err, RecordError::Json(_)));
    }

    #[test]
    fn test_accessibility_labels() {
        assert_eq!(Accessibility::from_label("medium"), Accessibility::Medium);
        assert_eq!(Accessibility::from_label(" POOR "), Accessibility::Poor);
        assert_eq!(Accessibility::from_label("swamp"), Accessibility::Good);
        assert_eq!(Accessibility::Medium.label(), "medium");
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..30 {
            time.advance(1.0 / 30.0);
        }
        assert_eq!(time.tick, 30);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_geo_label() {
        assert_eq!(GeoPoint::new(46.55781, 15.645).label(), "46.5578, 15.6450");
    }

    #[test]
    fn test_game_phase_terminal() {
        assert!(!GamePhase::Active.is_finished());
        assert!(!GamePhase::Paused.is_finished());
        assert!(GamePhase::GameOver.is_finished());
        assert!(GamePhase::Completed.is_finished());
    }

    /// Events and commands are tagged unions on the wire.
    #[test]
    fn test_event_and_command_tags() {
        let event = SimEvent::AllTrucksArrived { mission: 3, fire: 1 };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"AllTrucksArrived""#), "{json}");
        let back: SimEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);

        let command: PlayerCommand =
            serde_json::from_str(r#"{ "type": "SetTimeScale", "scale": 2.0 }"#).unwrap();
        assert_eq!(command, PlayerCommand::SetTimeScale { scale: 2.0 });
    }
}
