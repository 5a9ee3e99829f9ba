//! Main menu loop
//!
//! Drives the whole session: prompts for sensor readings, classifies and
//! confirms them, prints the reports and flushes the event list to the
//! binary log and text report after every saved event.

use anyhow::Context;
use mechalog_core::arraylist::ArrayList;
use mechalog_core::config::{Config, CONFIG_FILE};
use mechalog_core::datalog::{self, BINARY_LOG_FILE, REPORT_FILE};
use mechalog_core::event::{
    EventRecord, Operator, HUMIDITY_MAX, TEMPERATURE_MAX, TEMPERATURE_MIN,
};

use crate::prompt::prompt_in_range;

/// Badge number stamped on every record of this installation
const OPERATOR_ID: u32 = 32765881;

/// Operator name stamped on every record
const OPERATOR_NAME: &str = "Shift Operator";

/// Rejected input lines allowed before a prompt gives up
const PROMPT_ATTEMPTS: u32 = 5;

/// One interactive run of the logger
pub struct Session {
    config: Config,
    events: ArrayList<EventRecord>,
    /// Once the emergency switch fires, data entry stays locked until the
    /// program is restarted.
    emergency_engaged: bool,
}

impl Session {
    /// Load the configuration and any previously logged events.
    pub fn start() -> anyhow::Result<Self> {
        let config = Config::load_or_create(CONFIG_FILE)
            .with_context(|| format!("failed to load configuration from {CONFIG_FILE}"))?;
        let events = datalog::load(BINARY_LOG_FILE)
            .with_context(|| format!("failed to load event log from {BINARY_LOG_FILE}"))?;

        Ok(Self {
            config,
            events,
            emergency_engaged: false,
        })
    }

    /// Run the menu until the operator exits.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            println!();
            println!("*****************************************************");
            println!("|           MECHATRONIC CONTROL SYSTEM              |");
            println!("*****************************************************");
            println!();
            println!("1 - NEW SENSOR READING");
            println!("2 - EMERGENCY SWITCH");
            println!("3 - GENERAL EVENTS REPORT");
            println!("4 - EMERGENCY EVENTS REPORT");
            println!("5 - RELOAD CONFIGURATION");
            println!("6 - EXIT");
            println!();

            let option: u16 = prompt_in_range("OPTION: ", 1, 6, PROMPT_ATTEMPTS)?;
            println!();

            match option {
                1 => self.new_reading()?,
                2 => self.emergency_switch()?,
                3 => self.general_report(),
                4 => self.emergency_report(),
                5 => self.reload_config()?,
                _ => {
                    println!("Goodbye.");
                    return Ok(());
                }
            }
        }
    }

    fn operator(&self) -> Operator {
        Operator {
            id: OPERATOR_ID,
            name: OPERATOR_NAME.to_string(),
        }
    }

    /// Option 1: prompt for a reading, confirm it, store and persist it.
    fn new_reading(&mut self) -> anyhow::Result<()> {
        if self.emergency_engaged {
            println!("Data entry is locked: an emergency stop was executed this session.");
            return Ok(());
        }

        let mut record = self.prompt_record()?;

        loop {
            println!();
            print_record(&record);
            println!();
            println!("1 - CONFIRM");
            println!("2 - CANCEL");
            println!("3 - MODIFY");

            let option: u16 = prompt_in_range("OPTION: ", 1, 3, PROMPT_ATTEMPTS)?;
            match option {
                1 => {
                    self.events
                        .push(record)
                        .context("failed to store the new event")?;
                    self.persist();
                    println!("\n****** EVENT SAVED ******");
                    return Ok(());
                }
                2 => {
                    println!("\n****** OPERATION CANCELLED ******");
                    return Ok(());
                }
                _ => record = self.modify_record(record)?,
            }
        }
    }

    /// Read both sensors and classify the result.
    fn prompt_record(&self) -> anyhow::Result<EventRecord> {
        let temperature = prompt_in_range(
            "AMBIENT TEMPERATURE (C): ",
            TEMPERATURE_MIN,
            TEMPERATURE_MAX,
            PROMPT_ATTEMPTS,
        )?;
        let humidity = prompt_in_range(
            "AMBIENT HUMIDITY (%): ",
            0,
            HUMIDITY_MAX,
            PROMPT_ATTEMPTS,
        )?;

        Ok(EventRecord::new(
            temperature,
            humidity,
            &self.config,
            self.operator(),
        ))
    }

    /// Re-prompt parts of an unconfirmed record.
    fn modify_record(&self, record: EventRecord) -> anyhow::Result<EventRecord> {
        println!();
        println!("1 - MODIFY BOTH READINGS");
        println!("2 - MODIFY TEMPERATURE");
        println!("3 - MODIFY HUMIDITY");
        println!("4 - KEEP AS IS");

        let option: u16 = prompt_in_range("OPTION: ", 1, 4, PROMPT_ATTEMPTS)?;
        println!();

        let (temperature, humidity) = match option {
            1 => return self.prompt_record(),
            2 => (
                prompt_in_range(
                    "AMBIENT TEMPERATURE (C): ",
                    TEMPERATURE_MIN,
                    TEMPERATURE_MAX,
                    PROMPT_ATTEMPTS,
                )?,
                record.humidity,
            ),
            3 => (
                record.temperature,
                prompt_in_range("AMBIENT HUMIDITY (%): ", 0, HUMIDITY_MAX, PROMPT_ATTEMPTS)?,
            ),
            _ => return Ok(record),
        };

        // reclassify with the edited readings
        Ok(EventRecord::new(
            temperature,
            humidity,
            &self.config,
            self.operator(),
        ))
    }

    /// Option 2: confirm and log an emergency stop.
    fn emergency_switch(&mut self) -> anyhow::Result<()> {
        println!("************ EMERGENCY STOP ************");
        println!();
        println!("EXECUTE EMERGENCY STOP?");
        println!("1 - CONFIRM");
        println!("2 - CANCEL");

        let option: u16 = prompt_in_range("OPTION: ", 1, 2, PROMPT_ATTEMPTS)?;
        if option != 1 {
            println!("\nOPERATION CANCELLED");
            return Ok(());
        }

        let record = EventRecord::emergency(&self.config, self.operator());
        print_record(&record);
        self.events
            .push(record)
            .context("failed to store the emergency event")?;
        self.persist();
        self.emergency_engaged = true;

        println!("\nEMERGENCY STOP EXECUTED");
        Ok(())
    }

    /// Option 3: print every logged event.
    fn general_report(&self) {
        println!("************** GENERAL EVENTS REPORT **************");
        println!();

        if self.events.is_empty() {
            println!("No events have been logged yet.");
            return;
        }

        for record in &self.events {
            print_record(record);
            println!();
        }
        println!("Total events logged: {}", self.events.len());
    }

    /// Option 4: print only the emergency events.
    fn emergency_report(&self) {
        println!("************** EMERGENCY EVENTS REPORT **************");
        println!();

        let mut count = 0;
        for record in &self.events {
            if record.is_emergency() {
                print_record(record);
                println!();
                count += 1;
            }
        }

        if count == 0 {
            println!("No emergency events have been logged.");
        } else {
            println!("Total emergency events logged: {count}");
        }
    }

    /// Option 5: re-read the configuration file.
    fn reload_config(&mut self) -> anyhow::Result<()> {
        self.config = Config::load_or_create(CONFIG_FILE)
            .with_context(|| format!("failed to reload configuration from {CONFIG_FILE}"))?;

        println!("Configuration in force:");
        println!(
            "- Engine-on temperature: {:.2} C",
            self.config.engine_on_temperature
        );
        println!(
            "- Engine-off temperature: {:.2} C",
            self.config.engine_off_temperature
        );
        println!("- Humidity threshold: {}%", self.config.humidity_threshold);
        Ok(())
    }

    /// Flush the event list to both files. Failures are logged, not fatal:
    /// the in-memory list still holds the data for the next attempt.
    fn persist(&self) {
        if let Err(e) = datalog::save(BINARY_LOG_FILE, &self.events) {
            tracing::error!("failed to write {BINARY_LOG_FILE}: {e}");
        }
        if let Err(e) = datalog::write_report(REPORT_FILE, &self.events) {
            tracing::error!("failed to write {REPORT_FILE}: {e}");
        }
    }
}

fn print_record(record: &EventRecord) {
    println!("---------------------------------------------------");
    println!("DATE:                 {}", record.timestamp.format("%d/%m/%Y %H:%M:%S"));
    println!("OPERATOR ID:          {}", record.operator.id);
    println!("OPERATOR:             {}", record.operator.name);
    println!("EVENT:                {}", record.kind);
    println!("AMBIENT TEMPERATURE:  {:.2} C", record.temperature);
    println!("AMBIENT HUMIDITY:     {}%", record.humidity);
    println!("ENGINE-ON THRESHOLD:  {:.2} C", record.engine_on_temperature);
    println!("ENGINE-OFF THRESHOLD: {:.2} C", record.engine_off_temperature);
    println!("HUMIDITY THRESHOLD:   {}%", record.humidity_threshold);
    println!("---------------------------------------------------");
}
