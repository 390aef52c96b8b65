//! Leitor de planilhas baseado em calamine.
//!
//! Abre arquivos .xlsx e .xlsm e materializa abas como grades imutáveis,
//! preservando o endereçamento absoluto: uma aba cujos dados começam em B3
//! produz uma grade com as duas primeiras linhas e a primeira coluna vazias.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};

use crate::error::ReportError;
use crate::grid::Grid;
use crate::types::CellValue;

/// Leitor de uma planilha de rentabilidade.
///
/// # Exemplos
///
/// ```rust,no_run
/// use mmzr_report::WorkbookReader;
///
/// # fn main() -> Result<(), mmzr_report::ReportError> {
/// let mut workbook = WorkbookReader::open("Planilha Inteli.xlsm")?;
/// let grid = workbook.load_grid("Base Consolidada")?;
/// # Ok(())
/// # }
/// ```
pub struct WorkbookReader {
    sheets: Sheets<BufReader<File>>,
}

impl WorkbookReader {
    /// Abre a planilha no caminho informado.
    ///
    /// O formato é detectado pela extensão e pelo conteúdo; .xlsx e .xlsm
    /// são os formatos usados pelos bankers.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let sheets = open_workbook_auto(path)?;
        tracing::info!(planilha = %path.display(), "planilha carregada");
        Ok(Self { sheets })
    }

    /// Nomes das abas da planilha, na ordem do arquivo.
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names().to_vec()
    }

    /// Carrega uma aba como grade de células.
    ///
    /// # Erros
    ///
    /// * [`ReportError::SheetNotFound`] se a aba não existe
    /// * [`ReportError::Parse`] se o calamine não consegue ler a aba
    pub fn load_grid(&mut self, sheet_name: &str) -> Result<Grid, ReportError> {
        if !self.sheet_names().iter().any(|name| name == sheet_name) {
            return Err(ReportError::SheetNotFound(sheet_name.to_string()));
        }

        let range = self.sheets.worksheet_range(sheet_name)?;
        let grid = grid_from_range(&range);
        tracing::debug!(
            aba = sheet_name,
            linhas = grid.rows(),
            colunas = grid.cols(),
            "aba materializada"
        );
        Ok(grid)
    }
}

/// Converte um `Range` do calamine em grade, preenchendo o deslocamento
/// inicial do range com células vazias.
fn grid_from_range(range: &Range<Data>) -> Grid {
    let Some((start_row, start_col)) = range.start() else {
        return Grid::from_rows(Vec::new());
    };

    let mut rows = Vec::with_capacity(start_row as usize + range.height());
    for _ in 0..start_row {
        rows.push(Vec::new());
    }
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; start_col as usize];
        cells.extend(row.iter().map(cell_from_data));
        rows.push(cells);
    }
    Grid::from_rows(rows)
}

/// Converte um valor de célula do calamine no valor do crate.
fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}
