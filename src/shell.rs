//! Interactive editing session
//!
//! A numbered menu over one blueprint library and one track. Reads commands
//! from any `BufRead` and writes to any `Write`, so sessions can be scripted.
//! Bad input or a failed operation prints a message and returns to the menu.

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::blueprint::BlueprintLibrary;
use crate::config::EditorConfig;
use crate::track::{
    load_project, save_project, summary_header, write_track_xml, Placement, Track, TrackError,
};

/// Menu entries, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ListBlueprints = 0,
    AddInstance = 1,
    RemoveInstance = 2,
    ShowInstances = 3,
    SetInstanceCounter = 4,
    LoadProject = 5,
    SaveProject = 6,
    GenerateXml = 7,
    Quit = 8,
}

impl Command {
    pub const ALL: [Command; 9] = [
        Command::ListBlueprints,
        Command::AddInstance,
        Command::RemoveInstance,
        Command::ShowInstances,
        Command::SetInstanceCounter,
        Command::LoadProject,
        Command::SaveProject,
        Command::GenerateXml,
        Command::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Command::ListBlueprints => "List available blueprints",
            Command::AddInstance => "Add instance",
            Command::RemoveInstance => "Remove instance",
            Command::ShowInstances => "Show instances",
            Command::SetInstanceCounter => "Set instance counter",
            Command::LoadProject => "Load project",
            Command::SaveProject => "Save project",
            Command::GenerateXml => "Generate XML",
            Command::Quit => "Quit",
        }
    }

    pub fn from_index(i: usize) -> Option<Command> {
        Command::ALL.get(i).copied()
    }

    /// Parse a 1-based menu choice
    pub fn parse_choice(input: &str) -> Option<Command> {
        let choice = input.trim().parse::<usize>().ok()?;
        choice.checked_sub(1).and_then(Command::from_index)
    }
}

enum Flow {
    Continue,
    Quit,
}

/// An editing session bound to an input and an output stream
pub struct Shell<'a, R, W> {
    library: &'a BlueprintLibrary,
    track: Track,
    config: EditorConfig,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(library: &'a BlueprintLibrary, config: EditorConfig, input: R, output: W) -> Self {
        Self {
            library,
            track: Track::with_instance_counter(config.initial_instance_id),
            config,
            input,
            output,
        }
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Run the menu loop until Quit or end of input
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Welcome to the Extended Liftoff Editor!")?;

        loop {
            self.print_menu()?;
            let Some(line) = self.prompt()? else {
                return Ok(());
            };
            let Some(command) = Command::parse_choice(&line) else {
                continue;
            };
            if let Flow::Quit = self.execute(command)? {
                return Ok(());
            }
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        for (i, command) in Command::ALL.iter().enumerate() {
            writeln!(self.output, "{} - {}", i + 1, command.label())?;
        }
        Ok(())
    }

    /// Print the prompt and read one line; `None` at end of input
    fn prompt(&mut self) -> io::Result<Option<String>> {
        write!(self.output, "> ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn execute(&mut self, command: Command) -> io::Result<Flow> {
        match command {
            Command::ListBlueprints => self.list_blueprints()?,
            Command::AddInstance => self.add_instance()?,
            Command::RemoveInstance => self.remove_instance()?,
            Command::ShowInstances => self.show_instances()?,
            Command::SetInstanceCounter => self.set_instance_counter()?,
            Command::LoadProject => self.load_project()?,
            Command::SaveProject => self.save_project()?,
            Command::GenerateXml => self.generate_xml()?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn list_blueprints(&mut self) -> io::Result<()> {
        for (name, blueprint) in self.library.iter() {
            match self.library.preview(name) {
                Some(p) => writeln!(
                    self.output,
                    "--- {} ({} items, preview {}x{})",
                    name,
                    blueprint.len(),
                    p.width,
                    p.height
                )?,
                None => writeln!(self.output, "--- {} ({} items)", name, blueprint.len())?,
            }
        }
        Ok(())
    }

    fn add_instance(&mut self) -> io::Result<()> {
        writeln!(self.output, "Add an instance by typing n:x:y:z:p:y:r where")?;
        writeln!(self.output, "\tn is the name of the blueprint")?;
        writeln!(self.output, "\tx, y, z are the coordinates")?;
        writeln!(self.output, "\tp, y, r are the pitch, yaw and roll angles in degrees")?;
        let Some(line) = self.prompt()? else {
            return Ok(());
        };

        let placement = match line.parse::<Placement>() {
            Ok(p) => p,
            Err(e) => return writeln!(self.output, "Invalid instance: {}", e),
        };
        match self.track.place(self.library, &placement) {
            Ok(_) => writeln!(self.output, "Done"),
            Err(e) => writeln!(self.output, "{}", e),
        }
    }

    fn remove_instance(&mut self) -> io::Result<()> {
        if self.track.is_empty() {
            return writeln!(self.output, "There are no instances to remove");
        }
        self.show_instances()?;
        writeln!(self.output, "Specify the index of the instance to remove")?;
        let Some(line) = self.prompt()? else {
            return Ok(());
        };

        let removed = line.parse::<usize>().ok().and_then(|i| self.track.remove(i));
        match removed {
            Some(_) => writeln!(self.output, "Done"),
            None => writeln!(self.output, "Invalid index"),
        }
    }

    fn show_instances(&mut self) -> io::Result<()> {
        if self.track.is_empty() {
            return writeln!(self.output, "There are no instances to show");
        }
        writeln!(self.output, "    {}", summary_header())?;
        for (i, row) in self.track.summary_rows().iter().enumerate() {
            writeln!(self.output, "{} - {}", i, row)?;
        }
        Ok(())
    }

    fn set_instance_counter(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "Current instance counter: {}",
            self.track.instance_counter()
        )?;
        let Some(line) = self.prompt()? else {
            return Ok(());
        };

        match line.parse::<u64>() {
            Ok(value) => {
                self.track.set_instance_counter(value);
                writeln!(self.output, "Done")
            }
            Err(_) => writeln!(self.output, "Value must be a non-negative integer"),
        }
    }

    fn load_project(&mut self) -> io::Result<()> {
        let path = self.config.project_file.clone();
        match load_project(&mut self.track, self.library, &path) {
            Ok(count) => writeln!(self.output, "Project loaded ({} instances)", count),
            Err(TrackError::Io(e)) => {
                warn!("Could not read {}: {}", path.display(), e);
                writeln!(self.output, "The file '{}' could not be read", path.display())
            }
            Err(e) => writeln!(self.output, "Project not loaded: {}", e),
        }
    }

    fn save_project(&mut self) -> io::Result<()> {
        let path = self.config.project_file.clone();
        match save_project(&self.track, &path) {
            Ok(()) => writeln!(self.output, "Project saved into '{}'", path.display()),
            Err(e) => writeln!(self.output, "Project not saved: {}", e),
        }
    }

    fn generate_xml(&mut self) -> io::Result<()> {
        let path = self.config.track_file.clone();
        match write_track_xml(&self.track, &path) {
            Ok(()) => writeln!(self.output, "Track saved into '{}'", path.display()),
            Err(e) => writeln!(self.output, "Track not saved: {}", e),
        }
    }
}
