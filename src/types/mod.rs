pub mod raw_observation;
pub mod weather_observed;
