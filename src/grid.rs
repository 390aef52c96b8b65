//! Módulo Grid
//!
//! Visão retangular e imutável sobre as células de uma aba da planilha.
//! Linhas de comprimento irregular são tratadas como se terminassem em
//! células vazias. A localização de rótulos de seção percorre a grade por
//! linhas, e o primeiro rótulo encontrado vence: esse critério de desempate
//! é parte do contrato, não um acidente da ordem dos laços.

use crate::types::{CellValue, LabelMatch};

/// Grade de células extraída de uma aba da planilha.
///
/// Construída uma vez por aba e descartada depois que todas as seções foram
/// extraídas. Não há mutação nem compartilhamento de estado de varredura
/// entre abas.
///
/// # Exemplos
///
/// ```rust
/// use mmzr_report::{CellValue, Grid};
///
/// let grid = Grid::from_rows(vec![
///     vec![CellValue::Text("Performance".to_string())],
///     vec![],
///     vec![
///         CellValue::Text("Mês atual".to_string()),
///         CellValue::Number(2.38),
///     ],
/// ]);
///
/// let m = grid.locate_label("Performance").unwrap();
/// assert_eq!((m.row, m.col), (0, 0));
/// assert_eq!(grid.cell_number(2, 1), Some(2.38));
/// ```
#[derive(Debug, Clone)]
pub struct Grid {
    /// Células (linha x coluna).
    cells: Vec<Vec<CellValue>>,

    /// Quantidade de linhas.
    rows: usize,

    /// Quantidade de colunas da linha mais larga.
    cols: usize,
}

impl Grid {
    /// Constrói a grade a partir das linhas de uma aba.
    ///
    /// Linhas mais curtas que a mais larga são consideradas completadas com
    /// células vazias. Nenhuma cópia de preenchimento é feita: os acessores
    /// respondem `Empty` para posições além do fim da linha.
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        let n_rows = rows.len();
        let n_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self {
            cells: rows,
            rows: n_rows,
            cols: n_cols,
        }
    }

    /// Quantidade de linhas da grade.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Quantidade de colunas da grade.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Valor da célula em (row, col).
    ///
    /// Posições fora dos limites e posições além do fim de uma linha curta
    /// respondem [`CellValue::Empty`].
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&CellValue::Empty)
    }

    /// Forma textual da célula em (row, col), se não vazia.
    pub fn cell_text(&self, row: usize, col: usize) -> Option<String> {
        self.cell(row, col).as_text()
    }

    /// Forma numérica da célula em (row, col), se coercível.
    pub fn cell_number(&self, row: usize, col: usize) -> Option<f64> {
        self.cell(row, col).as_number()
    }

    /// Localiza a primeira célula cujo texto contém `label`.
    ///
    /// A busca é sensível a maiúsculas e percorre a grade por linhas (linha
    /// crescente e, dentro de cada linha, coluna crescente). Havendo mais de
    /// uma ocorrência, a primeira nessa ordem vence.
    ///
    /// # Retorno
    ///
    /// * `Some(LabelMatch)` com a posição da primeira ocorrência
    /// * `None` se o rótulo não ocorre em nenhuma célula
    pub fn locate_label(&self, label: &str) -> Option<LabelMatch> {
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if let Some(text) = cell.as_text() {
                    if text.contains(label) {
                        return Some(LabelMatch { row, col });
                    }
                }
            }
        }
        None
    }
}
