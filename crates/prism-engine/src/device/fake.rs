//! In-memory `GlDriver` for unit tests.
//!
//! Compile rule: non-empty source containing `void main` and no `#error`.
//! Link rule: exactly one compiled vertex stage and one compiled fragment stage.
//! Uniforms are reflected from `uniform <type> <name>;` lines.

use std::cell::RefCell;
use std::collections::HashMap;

use super::{GlDriver, Stage};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FakeShader(pub u32);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FakeProgram(pub u32);

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FakeLocation(pub u32);

#[derive(Debug, Copy, Clone, PartialEq)]
enum Value {
    Int(i32),
    Float(f32),
}

#[derive(Debug)]
struct ShaderObj {
    stage: Stage,
    source: String,
    compiled: bool,
    log: String,
    deleted: bool,
}

#[derive(Debug, Default)]
struct ProgramObj {
    attached: Vec<u32>,
    linked: bool,
    log: String,
    uniforms: Vec<String>,
    values: HashMap<u32, Value>,
    deleted: bool,
}

#[derive(Debug, Default)]
struct State {
    next_id: u32,
    shaders: HashMap<u32, ShaderObj>,
    programs: HashMap<u32, ProgramObj>,
    current: Option<u32>,
    uniform_writes: usize,
    deleted_programs: Vec<u32>,
    fail_stage_creation: bool,
    fail_program_creation: bool,
}

impl State {
    fn alloc(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn write_current(&mut self, location: &FakeLocation, value: Value) {
        let Some(current) = self.current else { return };
        let Some(program) = self.programs.get_mut(&current) else { return };
        if !program.linked || location.0 as usize >= program.uniforms.len() {
            return;
        }
        program.values.insert(location.0, value);
        self.uniform_writes += 1;
    }

    fn read(&self, program: FakeProgram, location: &FakeLocation) -> Option<Value> {
        self.programs
            .get(&program.0)
            .and_then(|p| p.values.get(&location.0))
            .copied()
    }
}

#[derive(Debug, Default)]
pub struct FakeDriver {
    state: RefCell<State>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent stage creation fail.
    pub fn fail_stage_creation(&self) {
        self.state.borrow_mut().fail_stage_creation = true;
    }

    /// Makes every subsequent program creation fail.
    pub fn fail_program_creation(&self) {
        self.state.borrow_mut().fail_program_creation = true;
    }

    pub fn live_stages(&self) -> usize {
        self.state.borrow().shaders.values().filter(|s| !s.deleted).count()
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.values().filter(|p| !p.deleted).count()
    }

    /// Programs in deletion order, duplicates included.
    pub fn deleted_programs(&self) -> Vec<FakeProgram> {
        self.state.borrow().deleted_programs.iter().map(|&id| FakeProgram(id)).collect()
    }

    pub fn current_program(&self) -> Option<FakeProgram> {
        self.state.borrow().current.map(FakeProgram)
    }

    /// Source text uploaded for each stage, in creation order.
    pub fn uploaded_sources(&self) -> Vec<(Stage, String)> {
        let state = self.state.borrow();
        let mut ids: Vec<_> = state.shaders.keys().copied().collect();
        ids.sort_unstable();
        ids.into_iter()
            .map(|id| {
                let s = &state.shaders[&id];
                (s.stage, s.source.clone())
            })
            .collect()
    }

    pub fn uniform_writes(&self) -> usize {
        self.state.borrow().uniform_writes
    }
}

fn compile(source: &str) -> Result<(), String> {
    if source.trim().is_empty() {
        return Err("0:0(0): error: empty shader source".to_string());
    }
    if let Some(line) = source.lines().position(|l| l.trim_start().starts_with("#error")) {
        return Err(format!("0:{}(1): error: #error directive", line + 1));
    }
    if !source.contains("void main") {
        return Err("0:1(1): error: missing main function".to_string());
    }
    Ok(())
}

fn reflect_uniforms(source: &str, out: &mut Vec<String>) {
    for line in source.lines() {
        let Some(rest) = line.trim().strip_prefix("uniform ") else { continue };
        let mut parts = rest.split_whitespace();
        let (Some(_ty), Some(name)) = (parts.next(), parts.next()) else { continue };
        let name = name.trim_end_matches(';').to_string();
        if !out.contains(&name) {
            out.push(name);
        }
    }
}

impl GlDriver for FakeDriver {
    type Shader = FakeShader;
    type Program = FakeProgram;
    type UniformLocation = FakeLocation;

    fn create_stage(&self, stage: Stage) -> Result<Self::Shader, String> {
        let mut state = self.state.borrow_mut();
        if state.fail_stage_creation {
            return Err(format!("cannot allocate {stage} shader object"));
        }
        let id = state.alloc();
        state.shaders.insert(
            id,
            ShaderObj {
                stage,
                source: String::new(),
                compiled: false,
                log: String::new(),
                deleted: false,
            },
        );
        Ok(FakeShader(id))
    }

    fn set_stage_source(&self, shader: Self::Shader, source: &str) {
        if let Some(s) = self.state.borrow_mut().shaders.get_mut(&shader.0) {
            s.source = source.to_string();
        }
    }

    fn compile_stage(&self, shader: Self::Shader) {
        if let Some(s) = self.state.borrow_mut().shaders.get_mut(&shader.0) {
            match compile(&s.source) {
                Ok(()) => {
                    s.compiled = true;
                    s.log.clear();
                }
                Err(log) => {
                    s.compiled = false;
                    s.log = log;
                }
            }
        }
    }

    fn stage_compile_status(&self, shader: Self::Shader) -> bool {
        self.state.borrow().shaders.get(&shader.0).is_some_and(|s| s.compiled)
    }

    fn stage_info_log(&self, shader: Self::Shader) -> String {
        self.state
            .borrow()
            .shaders
            .get(&shader.0)
            .map(|s| s.log.clone())
            .unwrap_or_default()
    }

    fn delete_stage(&self, shader: Self::Shader) {
        if let Some(s) = self.state.borrow_mut().shaders.get_mut(&shader.0) {
            assert!(!s.deleted, "stage {} deleted twice", shader.0);
            s.deleted = true;
        }
    }

    fn new_program(&self) -> Result<Self::Program, String> {
        let mut state = self.state.borrow_mut();
        if state.fail_program_creation {
            return Err("cannot allocate program object".to_string());
        }
        let id = state.alloc();
        state.programs.insert(id, ProgramObj::default());
        Ok(FakeProgram(id))
    }

    fn attach_stage(&self, program: Self::Program, shader: Self::Shader) {
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program.0) {
            p.attached.push(shader.0);
        }
    }

    fn link(&self, program: Self::Program) {
        let mut state = self.state.borrow_mut();
        let State { shaders, programs, .. } = &mut *state;
        let Some(p) = programs.get_mut(&program.0) else { return };

        let stages: Vec<&ShaderObj> = p.attached.iter().filter_map(|id| shaders.get(id)).collect();
        let count = |stage: Stage| stages.iter().filter(|s| s.stage == stage).count();

        p.uniforms.clear();
        p.values.clear();
        if stages.iter().any(|s| !s.compiled) {
            p.linked = false;
            p.log = "error: linking with uncompiled shader".to_string();
        } else if count(Stage::Vertex) != 1 || count(Stage::Fragment) != 1 {
            p.linked = false;
            p.log = "error: program needs one vertex and one fragment shader".to_string();
        } else {
            p.linked = true;
            p.log.clear();
            for s in &stages {
                reflect_uniforms(&s.source, &mut p.uniforms);
            }
        }
    }

    fn link_status(&self, program: Self::Program) -> bool {
        self.state.borrow().programs.get(&program.0).is_some_and(|p| p.linked)
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        self.state
            .borrow()
            .programs
            .get(&program.0)
            .map(|p| p.log.clone())
            .unwrap_or_default()
    }

    fn release_program(&self, program: Self::Program) {
        let mut state = self.state.borrow_mut();
        state.deleted_programs.push(program.0);
        if let Some(p) = state.programs.get_mut(&program.0) {
            p.deleted = true;
        }
        if state.current == Some(program.0) {
            state.current = None;
        }
    }

    fn bind_program(&self, program: Option<Self::Program>) {
        self.state.borrow_mut().current = program.map(|p| p.0);
    }

    fn find_uniform(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation> {
        let state = self.state.borrow();
        let p = state.programs.get(&program.0)?;
        if !p.linked {
            return None;
        }
        p.uniforms
            .iter()
            .position(|u| u == name)
            .map(|i| FakeLocation(i as u32))
    }

    fn set_uniform_i32(&self, location: &Self::UniformLocation, value: i32) {
        self.state.borrow_mut().write_current(location, Value::Int(value));
    }

    fn set_uniform_f32(&self, location: &Self::UniformLocation, value: f32) {
        self.state.borrow_mut().write_current(location, Value::Float(value));
    }

    fn read_uniform_i32(&self, program: Self::Program, location: &Self::UniformLocation) -> i32 {
        match self.state.borrow().read(program, location) {
            Some(Value::Int(v)) => v,
            Some(Value::Float(v)) => v as i32,
            None => 0,
        }
    }

    fn read_uniform_f32(&self, program: Self::Program, location: &Self::UniformLocation) -> f32 {
        match self.state.borrow().read(program, location) {
            Some(Value::Int(v)) => v as f32,
            Some(Value::Float(v)) => v,
            None => 0.0,
        }
    }
}
